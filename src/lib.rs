//! Zapisani - dating profiles, preference matching and direct messaging
//!
//! The `core` module holds the profile preference filter and the inbox
//! query builder as plain functions over loaded records; `services` talks
//! to PostgreSQL and handles credentials; `routes` exposes it all over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, InboxQuery, InboxFacet, ProfileFilter, AgeWindowMode, calculate_age};
pub use crate::models::{User, UserProfile, ProfileCard, Message, MessageEnvelope, MatchPreferences, Sex, SexPreference};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let dob = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(calculate_age(dob, today), 20);
        assert_eq!(Matcher::default().age_window(), AgeWindowMode::Approximate);
    }
}
