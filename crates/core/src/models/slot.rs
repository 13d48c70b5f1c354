use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated, fixed-size sub-interval of a schedule window. Slots are a
/// materialized index for discovery only; booking validity is always
/// re-checked against the live schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
