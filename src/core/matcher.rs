use std::collections::HashSet;

use chrono::NaiveDate;

use crate::core::age::AgeWindowMode;
use crate::core::filters::ProfileFilter;
use crate::models::{MatchPreferences, ProfileCard, ProfileListQuery};

/// Result of the browse-profiles pipeline
#[derive(Debug)]
pub struct MatchResult {
    pub profiles: Vec<ProfileCard>,
    pub total_candidates: usize,
}

/// Preference filter orchestrator
///
/// # Pipeline Stages
/// 1. Self-exclusion
/// 2. Sex preference
/// 3. Birth-date window from the age preferences
/// 4. First-name substring
/// 5. Username substring
/// 6. Followed-only narrowing
///
/// Survivors are ordered by user id ascending.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    age_window: AgeWindowMode,
}

impl Matcher {
    pub fn new(age_window: AgeWindowMode) -> Self {
        Self { age_window }
    }

    pub fn age_window(&self) -> AgeWindowMode {
        self.age_window
    }

    /// Build the filter for one browse request
    ///
    /// # Arguments
    /// * `preferences` - The viewer's stored preferences
    /// * `query` - Free-text narrowing from the query string
    /// * `followed` - Ids the viewer follows, when "followed only" was requested
    /// * `today` - Reference date for the age window
    pub fn build_filter(
        &self,
        preferences: &MatchPreferences,
        query: &ProfileListQuery,
        followed: Option<HashSet<i64>>,
        today: NaiveDate,
    ) -> ProfileFilter {
        let filter = ProfileFilter::from_preferences(preferences, today, self.age_window)
            .with_query(query);

        match followed {
            Some(ids) => filter.with_followed(ids),
            None => filter,
        }
    }

    /// Apply a filter to every candidate and order the survivors
    pub fn find_profiles(
        &self,
        filter: &ProfileFilter,
        candidates: Vec<ProfileCard>,
    ) -> MatchResult {
        let total_candidates = candidates.len();

        let mut profiles: Vec<ProfileCard> = candidates
            .into_iter()
            .filter(|profile| filter.matches(profile))
            .collect();

        profiles.sort_by_key(ProfileCard::user_id);
        profiles.dedup_by_key(|profile| profile.user_id());

        MatchResult {
            profiles,
            total_candidates,
        }
    }
}
