// Unit tests for Zapisani

use chrono::{Days, NaiveDate, TimeZone, Utc};
use zapisani::core::{
    age::{birth_date_window, calculate_age, AgeWindowMode},
    filters::{contains_ignore_case, matches_age_window, matches_sex_preference, preference_window},
    inbox::{open_message, parse_facets, InboxFacet},
};
use zapisani::models::{MatchPreferences, Message, ProfileCard, Sex, SexPreference, UserProfile};

fn create_profile(user_id: i64, sex: Sex, dob: Option<NaiveDate>) -> ProfileCard {
    ProfileCard {
        username: format!("user{}", user_id),
        first_name: "Marta".to_string(),
        last_name: "Wiśniewska".to_string(),
        sex,
        date_of_birth: dob,
        follower_count: 0,
        profile: UserProfile {
            user_id,
            country: Some("PL".to_string()),
            education: String::new(),
            job: String::new(),
            bio: String::new(),
            age: None,
            profile_pic: "profile_pics/default.png".to_string(),
            languages: "polski, angielski".to_string(),
            interests: "music,books".to_string(),
            min_age_preference: None,
            max_age_preference: None,
            sex_preference: SexPreference::Anyone,
        },
    }
}

fn create_message(receiver_id: i64, is_read: bool) -> Message {
    Message {
        id: 1,
        sender_id: 99,
        receiver_id,
        subject: "Hej".to_string(),
        body: "Kawa w piątek?".to_string(),
        sent_date: Utc.with_ymd_and_hms(2024, 2, 1, 8, 30, 0).unwrap(),
        is_read,
    }
}

#[test]
fn test_calculate_age_on_birthday() {
    let dob = NaiveDate::from_ymd_opt(1990, 7, 20).unwrap();
    assert_eq!(calculate_age(dob, NaiveDate::from_ymd_opt(2024, 7, 19).unwrap()), 33);
    assert_eq!(calculate_age(dob, NaiveDate::from_ymd_opt(2024, 7, 20).unwrap()), 34);
}

#[test]
fn test_approximate_window_drifts_with_leap_days() {
    // 20 * 365 days is five days short of 20 calendar years here.
    let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    let window = birth_date_window(20, 30, today, AgeWindowMode::Approximate);
    assert_eq!(window.latest, NaiveDate::from_ymd_opt(2004, 5, 15).unwrap());

    let calendar = birth_date_window(20, 30, today, AgeWindowMode::Calendar);
    assert_eq!(calendar.latest, NaiveDate::from_ymd_opt(2004, 5, 10).unwrap());
}

#[test]
fn test_sex_preference_stage() {
    let woman = create_profile(2, Sex::Woman, None);
    assert!(matches_sex_preference(&woman, SexPreference::Woman));
    assert!(matches_sex_preference(&woman, SexPreference::Anyone));
    assert!(!matches_sex_preference(&woman, SexPreference::Man));
}

#[test]
fn test_age_window_stage() {
    let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    let preferences = MatchPreferences {
        user_id: 1,
        sex_preference: SexPreference::Anyone,
        min_age_preference: Some(25),
        max_age_preference: Some(35),
    };
    let window = preference_window(&preferences, today, AgeWindowMode::Approximate);
    assert!(window.is_some());

    let inside = create_profile(2, Sex::Man, today.checked_sub_days(Days::new(30 * 365)));
    let outside = create_profile(3, Sex::Man, today.checked_sub_days(Days::new(40 * 365)));
    let unknown = create_profile(4, Sex::Man, None);

    assert!(matches_age_window(&inside, window.as_ref()));
    assert!(!matches_age_window(&outside, window.as_ref()));
    assert!(!matches_age_window(&unknown, window.as_ref()));
    assert!(matches_age_window(&unknown, None));
}

#[test]
fn test_zero_preference_is_a_bound() {
    let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    let preferences = MatchPreferences {
        user_id: 1,
        sex_preference: SexPreference::Anyone,
        min_age_preference: Some(0),
        max_age_preference: Some(18),
    };
    let window = preference_window(&preferences, today, AgeWindowMode::Approximate).unwrap();
    assert_eq!(window.latest, today);
}

#[test]
fn test_case_insensitive_contains() {
    assert!(contains_ignore_case("Małgorzata", "GORZ"));
    assert!(!contains_ignore_case("Ania", "ola"));
}

#[test]
fn test_parse_facets_order_and_dedup() {
    let facets = parse_facets(["Sent", "read", "sent", "bogus"]);
    assert_eq!(facets, vec![InboxFacet::Sent, InboxFacet::Read]);
}

#[test]
fn test_unread_facet_is_receiver_only() {
    let incoming = create_message(1, false);
    let outgoing = Message { sender_id: 1, receiver_id: 99, ..create_message(1, false) };

    assert!(InboxFacet::Unread.matches(&incoming, 1));
    assert!(!InboxFacet::Unread.matches(&outgoing, 1));
    assert!(InboxFacet::Sent.matches(&outgoing, 1));
}

#[test]
fn test_open_message_is_idempotent() {
    let mut message = create_message(1, false);
    let sent_date = message.sent_date;

    assert!(open_message(&mut message, 1));
    assert!(!open_message(&mut message, 1));
    assert!(message.is_read);
    assert_eq!(message.sent_date, sent_date);
}
