//! Slot generation.
//!
//! A schedule window is tiled from its start forward in fixed
//! `min_duration` steps. Slots are half-open and contiguous; a trailing
//! remainder shorter than one step is dropped. The iterator is pure and
//! restartable, so regeneration on schedule update is just another call.

use chrono::{DateTime, Duration, Utc};

/// Lazy sequence of `(slot_start, slot_end)` pairs covering a window.
#[derive(Debug, Clone)]
pub struct SlotIter {
    cursor: DateTime<Utc>,
    window_end: DateTime<Utc>,
    step: Duration,
}

impl Iterator for SlotIter {
    type Item = (DateTime<Utc>, DateTime<Utc>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.step <= Duration::zero() {
            return None;
        }
        let slot_end = self.cursor + self.step;
        if slot_end > self.window_end {
            return None;
        }
        let slot = (self.cursor, slot_end);
        self.cursor = slot_end;
        Some(slot)
    }
}

/// Tiles `[window_start, window_end)` in `min_duration` increments.
///
/// A window shorter than `min_duration` yields an empty sequence; that is
/// a valid (if unbookable) schedule, not an error.
pub fn generate_slots(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    min_duration: Duration,
) -> SlotIter {
    SlotIter {
        cursor: window_start,
        window_end,
        step: min_duration,
    }
}
