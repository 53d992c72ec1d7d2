// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Sex, SexPreference, User, UserProfile, ProfileCard, MatchPreferences, Message, MessageEnvelope};
pub use requests::{RegisterRequest, LoginRequest, ProfileSettingsRequest, AccountSettingsRequest, SendMessageRequest, ProfileListQuery, InboxParams};
pub use responses::{AuthResponse, OwnProfileResponse, ProfileListResponse, InboxResponse, FollowResponse, HealthResponse, ErrorResponse};
