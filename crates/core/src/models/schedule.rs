use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A host-declared availability window with duration bounds and an
/// approval policy. All instants are canonical UTC; durations are minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub host_id: Uuid,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub min_duration: i32,
    pub max_duration: i32,
    pub auto_approve: bool,
    pub created_at: DateTime<Utc>,
}

/// Wall-clock fields are interpreted in `timezone` and normalized to UTC
/// at the handler boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub host_id: Uuid,
    pub timezone: String,
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    pub min_duration: i32,
    pub max_duration: i32,
    #[serde(default)]
    pub auto_approve: bool,
}

/// Partial update with one explicit optional field per mutable attribute.
/// Absent fields keep their stored value; present fields are re-validated
/// together with the merged result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    pub host_id: Uuid,
    pub timezone: String,
    pub window_start: Option<NaiveDateTime>,
    pub window_end: Option<NaiveDateTime>,
    pub min_duration: Option<i32>,
    pub max_duration: Option<i32>,
    pub auto_approve: Option<bool>,
}

/// Schedule representation returned by create/update/list. Window fields
/// are rendered in `timezone` via the display conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub id: Uuid,
    pub host_id: Uuid,
    pub timezone: String,
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    pub min_duration: i32,
    pub max_duration: i32,
    pub auto_approve: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotResponse {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Schedule plus its generated slots, returned by get.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetScheduleResponse {
    #[serde(flatten)]
    pub schedule: ScheduleResponse,
    pub slots: Vec<SlotResponse>,
}
