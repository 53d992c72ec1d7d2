use serde::{Deserialize, Serialize};
use crate::models::domain::{MessageEnvelope, ProfileCard, User};

/// Response for register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: User,
}

/// The viewer's own account and profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnProfileResponse {
    pub user: User,
    pub profile: ProfileCard,
}

/// Response for the browse-profiles endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<ProfileCard>,
    pub total_results: usize,
}

/// Response for the inbox endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxResponse {
    pub messages: Vec<MessageEnvelope>,
    pub total_results: usize,
}

/// Follow state after a follow/unfollow call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowResponse {
    pub user_id: i64,
    pub following: bool,
    pub follower_count: i64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
