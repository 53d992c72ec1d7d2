// Core algorithm exports
pub mod age;
pub mod filters;
pub mod inbox;
pub mod matcher;

pub use age::{calculate_age, birth_date_window, AgeWindowMode, BirthDateWindow};
pub use filters::{contains_ignore_case, matches_sex_preference, matches_age_window, preference_window, ProfileFilter};
pub use inbox::{open_message, parse_facets, InboxFacet, InboxQuery};
pub use matcher::{Matcher, MatchResult};
