use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A booking between a host and a guest, anchored to one schedule.
///
/// `confirmed = true` holds a hard exclusivity lock on both calendars;
/// a pending session holds no lock and may overlap freely until approved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub host_id: Uuid,
    pub guest_id: Uuid,
    pub schedule_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub title: String,
    pub confirmed: bool,
    pub host_url: Option<String>,
    pub guest_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Wall-clock fields are interpreted in `timezone` and normalized to UTC
/// at the handler boundary. The schedule id arrives in the request path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub guest_id: Uuid,
    pub timezone: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveSessionRequest {
    pub host_id: Uuid,
}

/// Session representation with start/end rendered in `timezone` via the
/// display conversion. Meeting URLs are absent until provisioning succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub host_id: Uuid,
    pub guest_id: Uuid,
    pub schedule_id: Uuid,
    pub timezone: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: String,
    pub confirmed: bool,
    pub host_url: Option<String>,
    pub guest_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
