//! Pure booking rules: interval overlap and the validation halves of the
//! availability store and booking resolver. Everything here is stateless;
//! the conflict scans against stored sessions live in `slotbook-db`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};
use crate::models::schedule::Schedule;

/// Which side of a session a party is on. Host and guest are symmetric
/// first-class parties for conflict purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    Host,
    Guest,
}

/// Strict half-open interval overlap: `[a_start, a_end)` vs `[b_start, b_end)`.
/// Adjacent intervals do not overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Validates schedule duration bounds and window length.
///
/// An inverted or empty window fails the window-length check, so it needs
/// no separate error.
pub fn validate_schedule_bounds(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    min_duration: i32,
    max_duration: i32,
) -> BookingResult<()> {
    if min_duration <= 0 || max_duration <= 0 {
        return Err(BookingError::InvalidDuration(format!(
            "durations must be positive, got min={} max={}",
            min_duration, max_duration
        )));
    }
    if min_duration > max_duration {
        return Err(BookingError::InvalidDuration(format!(
            "min duration {} exceeds max duration {}",
            min_duration, max_duration
        )));
    }
    let window = window_end.signed_duration_since(window_start);
    if window < Duration::minutes(min_duration as i64) {
        return Err(BookingError::WindowTooShort(format!(
            "window of {} minutes cannot fit the minimum duration of {} minutes",
            window.num_minutes(),
            min_duration
        )));
    }
    Ok(())
}

/// Validates a requested session interval against its owning schedule:
/// the window must fully contain the interval, and the duration must fall
/// within the schedule's bounds.
pub fn validate_session_interval(
    schedule: &Schedule,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> BookingResult<()> {
    if start < schedule.window_start || end > schedule.window_end {
        return Err(BookingError::NotFound(format!(
            "schedule {} does not contain the requested interval",
            schedule.id
        )));
    }
    let requested = end.signed_duration_since(start);
    if requested < Duration::minutes(schedule.min_duration as i64)
        || requested > Duration::minutes(schedule.max_duration as i64)
    {
        return Err(BookingError::InvalidDuration(format!(
            "requested {} minutes, allowed {}..={} minutes",
            requested.num_minutes(),
            schedule.min_duration,
            schedule.max_duration
        )));
    }
    Ok(())
}
