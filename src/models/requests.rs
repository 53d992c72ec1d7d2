use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{Sex, SexPreference};

/// Request to create an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150), custom(function = "validate_username"))]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 8, max = 50), custom(function = "validate_password_strength"))]
    pub password: String,
    #[validate(must_match(other = "password"))]
    #[serde(alias = "passwordConfirmation", rename = "password_confirmation")]
    pub password_confirmation: String,
    #[validate(length(min = 1, max = 100))]
    #[serde(alias = "firstName")]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    #[serde(alias = "lastName")]
    pub last_name: String,
    pub sex: Sex,
    #[validate(custom(function = "validate_birth_date"))]
    #[serde(alias = "dateOfBirth")]
    pub date_of_birth: NaiveDate,
}

/// Login with either the e-mail address or the username
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255))]
    #[serde(alias = "username", alias = "email")]
    pub login: String,
    #[validate(length(min = 1, max = 150))]
    pub password: String,
}

/// Editable profile fields
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_age_preferences"))]
pub struct ProfileSettingsRequest {
    #[validate(length(max = 500))]
    #[serde(default)]
    pub bio: String,
    #[validate(custom(function = "validate_country_code"))]
    pub country: Option<String>,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub interests: String,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub languages: String,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub education: String,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub job: String,
    #[serde(default, alias = "sexPreference")]
    pub sex_preference: SexPreference,
    #[validate(range(min = 0, max = 150))]
    #[serde(alias = "minAgePreference")]
    pub min_age_preference: Option<i32>,
    #[validate(range(min = 0, max = 150))]
    #[serde(alias = "maxAgePreference")]
    pub max_age_preference: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    #[serde(alias = "profilePic")]
    pub profile_pic: Option<String>,
}

/// Editable account fields
///
/// The password changes only when `password` is sent, together with a
/// matching `password_confirmation`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_password_change"))]
pub struct AccountSettingsRequest {
    #[validate(length(min = 1, max = 150), custom(function = "validate_username"))]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    #[serde(alias = "firstName")]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    #[serde(alias = "lastName")]
    pub last_name: String,
    pub sex: Sex,
    #[validate(custom(function = "validate_birth_date"))]
    #[serde(alias = "dateOfBirth")]
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, alias = "passwordConfirmation")]
    pub password_confirmation: Option<String>,
}

/// Message body for both new messages and replies
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 80))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub body: String,
}

/// Query string of the browse-profiles view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileListQuery {
    pub name: Option<String>,
    pub username: Option<String>,
    pub followed: Option<String>,
}

impl ProfileListQuery {
    /// Build from raw query pairs; a repeated key keeps its last value
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => query.name = Some(value),
                "username" => query.username = Some(value),
                "followed" => query.followed = Some(value),
                _ => {}
            }
        }
        query
    }

    pub fn followed_only(&self) -> bool {
        matches!(
            self.followed.as_deref().map(str::trim),
            Some("1" | "true" | "on" | "yes")
        )
    }
}

/// Query string of the inbox view
///
/// `sorting` may repeat, so the raw pairs are collected instead of
/// deserializing into a struct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboxParams {
    pub sorting: Vec<String>,
    pub q: Option<String>,
}

impl InboxParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "sorting" => params.sorting.push(value),
                "q" => params.q = Some(value),
                _ => {}
            }
        }
        params
    }
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::new("username_blank"));
    }
    if username.trim() != username {
        return Err(ValidationError::new("username_surrounding_whitespace"));
    }
    Ok(())
}

fn validate_country_code(country: &str) -> Result<(), ValidationError> {
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::new("country_not_two_letters"));
    }
    Ok(())
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("password_entirely_numeric"));
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err(ValidationError::new("password_without_letters"));
    }
    Ok(())
}

fn validate_birth_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > Utc::now().date_naive() {
        return Err(ValidationError::new("birth_date_in_future"));
    }
    Ok(())
}

fn validate_password_change(request: &AccountSettingsRequest) -> Result<(), ValidationError> {
    match (&request.password, &request.password_confirmation) {
        (None, None) => Ok(()),
        (Some(password), Some(confirmation)) if password == confirmation => {
            let length = password.chars().count();
            if !(8..=50).contains(&length) {
                return Err(ValidationError::new("password_length"));
            }
            validate_password_strength(password)
        }
        _ => Err(ValidationError::new("password_mismatch")),
    }
}

fn validate_age_preferences(request: &ProfileSettingsRequest) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (request.min_age_preference, request.max_age_preference) {
        if min > max {
            return Err(ValidationError::new("min_age_above_max_age"));
        }
    }
    Ok(())
}
