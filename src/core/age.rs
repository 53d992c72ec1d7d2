use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Deserialize;

/// Year length used by the approximate birth-date window
pub const DAYS_PER_YEAR: u64 = 365;

/// How an age preference is turned into a birth-date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeWindowMode {
    /// `today - age * 365 days`, ignoring leap days
    #[default]
    Approximate,
    /// Exact calendar ages
    Calendar,
}

/// Inclusive range of birth dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDateWindow {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl BirthDateWindow {
    #[inline]
    pub fn contains(&self, date_of_birth: NaiveDate) -> bool {
        date_of_birth >= self.earliest && date_of_birth <= self.latest
    }

    pub fn is_empty(&self) -> bool {
        self.earliest > self.latest
    }
}

/// Calculate the calendar age on `today` of someone born on `date_of_birth`
///
/// Birthdays not yet reached this year do not count. A birth date in the
/// future yields 0.
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let before_birthday =
        (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day());
    let age = today.year() - date_of_birth.year() - i32::from(before_birthday);
    age.max(0)
}

/// Calculate the birth-date window for an age range
///
/// # Arguments
/// * `min_age` - Youngest accepted age in years
/// * `max_age` - Oldest accepted age in years
/// * `today` - Reference date
/// * `mode` - Approximate (365-day years) or exact calendar arithmetic
///
/// # Returns
/// BirthDateWindow with the earliest and latest accepted birth dates. The
/// window is empty when `min_age > max_age`.
pub fn birth_date_window(
    min_age: u32,
    max_age: u32,
    today: NaiveDate,
    mode: AgeWindowMode,
) -> BirthDateWindow {
    match mode {
        AgeWindowMode::Approximate => BirthDateWindow {
            earliest: days_before(today, u64::from(max_age) * DAYS_PER_YEAR),
            latest: days_before(today, u64::from(min_age) * DAYS_PER_YEAR),
        },
        AgeWindowMode::Calendar => {
            // Turning max_age + 1 tomorrow is still max_age today.
            let earliest = years_before(today, max_age.saturating_add(1))
                .checked_add_days(Days::new(1))
                .unwrap_or(NaiveDate::MIN);
            BirthDateWindow {
                earliest,
                latest: years_before(today, min_age),
            }
        }
    }
}

#[inline]
fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

#[inline]
fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    years
        .checked_mul(12)
        .and_then(|months| date.checked_sub_months(Months::new(months)))
        .unwrap_or(NaiveDate::MIN)
}
