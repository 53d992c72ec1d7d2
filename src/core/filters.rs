use std::collections::HashSet;

use chrono::NaiveDate;

use crate::core::age::{birth_date_window, AgeWindowMode, BirthDateWindow};
use crate::models::{MatchPreferences, ProfileCard, ProfileListQuery, SexPreference};

/// Case-insensitive substring test
#[inline]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Trimmed search term, `None` when blank
pub fn search_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
}

/// Check a candidate against a sex preference
///
/// This is Stage 2 of the preference filter.
#[inline]
pub fn matches_sex_preference(profile: &ProfileCard, preference: SexPreference) -> bool {
    preference.accepts(profile.sex)
}

/// Check a candidate against an optional birth-date window
///
/// This is Stage 3. Candidates without a date of birth never match an
/// active window.
#[inline]
pub fn matches_age_window(profile: &ProfileCard, window: Option<&BirthDateWindow>) -> bool {
    match window {
        None => true,
        Some(window) => profile
            .date_of_birth
            .map_or(false, |dob| window.contains(dob)),
    }
}

/// Build the birth-date window for a viewer's stored preferences
///
/// Both bounds must be present; a lone bound disables the stage. A stored
/// 0 is a real bound.
pub fn preference_window(
    preferences: &MatchPreferences,
    today: NaiveDate,
    mode: AgeWindowMode,
) -> Option<BirthDateWindow> {
    match (preferences.min_age_preference, preferences.max_age_preference) {
        (Some(min), Some(max)) => Some(birth_date_window(
            min.max(0).unsigned_abs(),
            max.max(0).unsigned_abs(),
            today,
            mode,
        )),
        _ => None,
    }
}

/// Everything needed to decide whether one candidate profile is visible
/// to a viewer
#[derive(Debug, Clone)]
pub struct ProfileFilter {
    pub viewer_id: i64,
    pub sex_preference: SexPreference,
    pub birth_window: Option<BirthDateWindow>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub followed: Option<HashSet<i64>>,
}

impl ProfileFilter {
    /// Filter driven only by stored preferences
    pub fn from_preferences(
        preferences: &MatchPreferences,
        today: NaiveDate,
        mode: AgeWindowMode,
    ) -> Self {
        Self {
            viewer_id: preferences.user_id,
            sex_preference: preferences.sex_preference,
            birth_window: preference_window(preferences, today, mode),
            name: None,
            username: None,
            followed: None,
        }
    }

    /// Add the free-text narrowing from the browse query string
    pub fn with_query(mut self, query: &ProfileListQuery) -> Self {
        self.name = search_term(query.name.as_deref());
        self.username = search_term(query.username.as_deref());
        self
    }

    /// Keep only the given followed user ids
    pub fn with_followed(mut self, followed: HashSet<i64>) -> Self {
        self.followed = Some(followed);
        self
    }

    /// Run every stage against a candidate
    pub fn matches(&self, profile: &ProfileCard) -> bool {
        // Stage 1: never show the viewer to themselves
        if profile.user_id() == self.viewer_id {
            return false;
        }

        if !matches_sex_preference(profile, self.sex_preference) {
            return false;
        }

        if !matches_age_window(profile, self.birth_window.as_ref()) {
            return false;
        }

        // Stage 4 & 5: free-text narrowing
        if let Some(name) = &self.name {
            if !contains_ignore_case(&profile.first_name, name) {
                return false;
            }
        }

        if let Some(username) = &self.username {
            if !contains_ignore_case(&profile.username, username) {
                return false;
            }
        }

        if let Some(followed) = &self.followed {
            if !followed.contains(&profile.user_id()) {
                return false;
            }
        }

        true
    }
}
