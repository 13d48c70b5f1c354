//! Canonical time conversion.
//!
//! Everything the engine stores or compares is a UTC instant. Wall-clock
//! timestamps exist only at the API boundary, always paired with an IANA
//! zone name, and cross through the two functions here.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::{BookingError, BookingResult};

fn parse_zone(zone: &str) -> BookingResult<Tz> {
    zone.parse::<Tz>().map_err(|_| {
        BookingError::InvalidTimestamp(format!("unrecognized timezone '{}'", zone))
    })
}

/// Converts a wall-clock timestamp in the given zone to a UTC instant.
///
/// A local time skipped by a DST transition does not exist and is rejected.
/// An ambiguous local time (DST fold) resolves to the earlier instant.
pub fn to_canonical(local: NaiveDateTime, zone: &str) -> BookingResult<DateTime<Utc>> {
    let tz = parse_zone(zone)?;
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(BookingError::InvalidTimestamp(format!(
            "{} does not exist in timezone '{}'",
            local, zone
        ))),
    }
}

/// Converts a UTC instant to wall-clock time in the given zone.
pub fn to_display(instant: DateTime<Utc>, zone: &str) -> BookingResult<NaiveDateTime> {
    let tz = parse_zone(zone)?;
    Ok(instant.with_timezone(&tz).naive_local())
}
