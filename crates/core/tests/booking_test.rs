use chrono::{DateTime, TimeZone, Utc};
use rstest::rstest;
use slotbook_core::booking::{overlaps, validate_schedule_bounds, validate_session_interval};
use slotbook_core::errors::BookingError;
use slotbook_core::models::schedule::Schedule;
use uuid::Uuid;

fn utc(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap()
}

fn schedule(min_duration: i32, max_duration: i32) -> Schedule {
    Schedule {
        id: Uuid::new_v4(),
        host_id: Uuid::new_v4(),
        window_start: utc(10, 0),
        window_end: utc(12, 0),
        min_duration,
        max_duration,
        auto_approve: false,
        created_at: utc(0, 1),
    }
}

#[rstest]
// Partial overlap on either side
#[case(utc(10, 0), utc(11, 0), utc(10, 30), utc(11, 30), true)]
#[case(utc(10, 30), utc(11, 30), utc(10, 0), utc(11, 0), true)]
// Containment in both directions
#[case(utc(10, 0), utc(12, 0), utc(10, 30), utc(11, 0), true)]
#[case(utc(10, 30), utc(11, 0), utc(10, 0), utc(12, 0), true)]
// Identical intervals
#[case(utc(10, 0), utc(11, 0), utc(10, 0), utc(11, 0), true)]
// Adjacent intervals do not overlap (half-open)
#[case(utc(10, 0), utc(11, 0), utc(11, 0), utc(12, 0), false)]
#[case(utc(11, 0), utc(12, 0), utc(10, 0), utc(11, 0), false)]
// Disjoint
#[case(utc(10, 0), utc(10, 30), utc(11, 0), utc(11, 30), false)]
fn test_overlaps(
    #[case] a_start: DateTime<Utc>,
    #[case] a_end: DateTime<Utc>,
    #[case] b_start: DateTime<Utc>,
    #[case] b_end: DateTime<Utc>,
    #[case] expected: bool,
) {
    assert_eq!(overlaps(a_start, a_end, b_start, b_end), expected);
}

#[test]
fn test_valid_schedule_bounds() {
    assert!(validate_schedule_bounds(utc(10, 0), utc(12, 0), 30, 60).is_ok());
    // Window exactly one minimum duration long is allowed
    assert!(validate_schedule_bounds(utc(10, 0), utc(10, 30), 30, 30).is_ok());
}

#[rstest]
#[case(0, 60)]
#[case(-15, 60)]
#[case(30, 0)]
#[case(60, 30)]
fn test_invalid_duration_bounds(#[case] min_duration: i32, #[case] max_duration: i32) {
    let result = validate_schedule_bounds(utc(10, 0), utc(12, 0), min_duration, max_duration);
    match result {
        Err(BookingError::InvalidDuration(_)) => {}
        other => panic!("Expected InvalidDuration, got: {:?}", other),
    }
}

#[test]
fn test_window_too_short() {
    // 20-minute window cannot fit a 30-minute minimum
    let result = validate_schedule_bounds(utc(9, 0), utc(9, 20), 30, 60);
    match result {
        Err(BookingError::WindowTooShort(_)) => {}
        other => panic!("Expected WindowTooShort, got: {:?}", other),
    }
}

#[test]
fn test_inverted_window_reads_as_too_short() {
    let result = validate_schedule_bounds(utc(12, 0), utc(10, 0), 30, 60);
    match result {
        Err(BookingError::WindowTooShort(_)) => {}
        other => panic!("Expected WindowTooShort, got: {:?}", other),
    }
}

#[test]
fn test_session_interval_within_bounds() {
    let schedule = schedule(30, 60);

    // 45 minutes inside a 30..=60 bound
    assert!(validate_session_interval(&schedule, utc(10, 0), utc(10, 45)).is_ok());
    // Both bounds are inclusive
    assert!(validate_session_interval(&schedule, utc(10, 0), utc(10, 30)).is_ok());
    assert!(validate_session_interval(&schedule, utc(10, 0), utc(11, 0)).is_ok());
}

#[test]
fn test_session_below_minimum_duration() {
    let schedule = schedule(30, 60);

    let result = validate_session_interval(&schedule, utc(10, 0), utc(10, 15));
    match result {
        Err(BookingError::InvalidDuration(_)) => {}
        other => panic!("Expected InvalidDuration, got: {:?}", other),
    }
}

#[test]
fn test_session_above_maximum_duration() {
    let schedule = schedule(30, 60);

    let result = validate_session_interval(&schedule, utc(10, 0), utc(11, 30));
    match result {
        Err(BookingError::InvalidDuration(_)) => {}
        other => panic!("Expected InvalidDuration, got: {:?}", other),
    }
}

#[rstest]
// Starts before the window
#[case(utc(9, 30), utc(10, 30))]
// Ends after the window
#[case(utc(11, 30), utc(12, 30))]
// Entirely outside
#[case(utc(13, 0), utc(13, 45))]
fn test_session_outside_window(#[case] start: DateTime<Utc>, #[case] end: DateTime<Utc>) {
    let schedule = schedule(30, 60);

    let result = validate_session_interval(&schedule, start, end);
    match result {
        Err(BookingError::NotFound(_)) => {}
        other => panic!("Expected NotFound, got: {:?}", other),
    }
}

#[test]
fn test_session_spanning_full_window() {
    // A session may span any sub-interval, not just a generated slot tile
    let schedule = schedule(30, 120);
    assert!(validate_session_interval(&schedule, utc(10, 0), utc(12, 0)).is_ok());
}
