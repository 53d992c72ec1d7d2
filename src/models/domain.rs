use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Sex stored on a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "sex")]
pub enum Sex {
    #[serde(rename = "W")]
    #[sqlx(rename = "W")]
    Woman,
    #[serde(rename = "M")]
    #[sqlx(rename = "M")]
    Man,
    #[serde(rename = "O")]
    #[sqlx(rename = "O")]
    Other,
}

/// Which sex a user wants to see when browsing profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "sex_preference")]
pub enum SexPreference {
    #[serde(rename = "W")]
    #[sqlx(rename = "W")]
    Woman,
    #[serde(rename = "M")]
    #[sqlx(rename = "M")]
    Man,
    #[serde(rename = "O")]
    #[sqlx(rename = "O")]
    Other,
    #[default]
    #[serde(rename = "A")]
    #[sqlx(rename = "A")]
    Anyone,
}

impl SexPreference {
    /// The single sex this preference narrows to, `None` for Anyone
    pub fn required_sex(self) -> Option<Sex> {
        match self {
            SexPreference::Woman => Some(Sex::Woman),
            SexPreference::Man => Some(Sex::Man),
            SexPreference::Other => Some(Sex::Other),
            SexPreference::Anyone => None,
        }
    }

    #[inline]
    pub fn accepts(self, sex: Sex) -> bool {
        self.required_sex().map_or(true, |required| required == sex)
    }
}

/// User account
///
/// The password hash lives only in the `users` table and is never part of this record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: Sex,
    pub date_of_birth: Option<NaiveDate>,
    pub is_active: bool,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

/// Profile data owned one-to-one by a [`User`]
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub user_id: i64,
    pub country: Option<String>,
    pub education: String,
    pub job: String,
    pub bio: String,
    pub age: Option<i32>,
    pub profile_pic: String,
    pub languages: String,
    pub interests: String,
    pub min_age_preference: Option<i32>,
    pub max_age_preference: Option<i32>,
    pub sex_preference: SexPreference,
}

/// A profile joined with the identity fields of its owner
///
/// This is the candidate type the preference filter works on and the
/// shape returned by the browse endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfileCard {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: Sex,
    pub date_of_birth: Option<NaiveDate>,
    pub follower_count: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub profile: UserProfile,
}

impl ProfileCard {
    #[inline]
    pub fn user_id(&self) -> i64 {
        self.profile.user_id
    }
}

/// The subset of a viewer's profile that drives matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPreferences {
    pub user_id: i64,
    pub sex_preference: SexPreference,
    pub min_age_preference: Option<i32>,
    pub max_age_preference: Option<i32>,
}

/// Direct message between two users
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub subject: String,
    pub body: String,
    pub sent_date: DateTime<Utc>,
    pub is_read: bool,
}

/// A message together with the display fields of both parties
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageEnvelope {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub message: Message,
    pub sender_username: String,
    pub sender_first_name: String,
    pub receiver_username: String,
    pub receiver_first_name: String,
}

impl MessageEnvelope {
    #[inline]
    pub fn involves(&self, user_id: i64) -> bool {
        self.message.sender_id == user_id || self.message.receiver_id == user_id
    }

    /// The other party of the conversation from the viewer's side
    pub fn counterparty_id(&self, viewer_id: i64) -> i64 {
        if self.message.receiver_id == viewer_id {
            self.message.sender_id
        } else {
            self.message.receiver_id
        }
    }

    /// `(first_name, username)` of the other party from the viewer's side
    pub fn counterparty_names(&self, viewer_id: i64) -> (&str, &str) {
        if self.message.receiver_id == viewer_id {
            (&self.sender_first_name, &self.sender_username)
        } else {
            (&self.receiver_first_name, &self.receiver_username)
        }
    }
}
