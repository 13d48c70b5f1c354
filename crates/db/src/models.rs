use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slotbook_core::models::schedule::Schedule;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: Uuid,
    pub host_id: Uuid,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub min_duration: i32,
    pub max_duration: i32,
    pub auto_approve: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSession {
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

impl From<DbSchedule> for Schedule {
    fn from(row: DbSchedule) -> Self {
        Schedule {
            id: row.id,
            host_id: row.host_id,
            window_start: row.window_start,
            window_end: row.window_end,
            min_duration: row.min_duration,
            max_duration: row.max_duration,
            auto_approve: row.auto_approve,
            created_at: row.created_at,
        }
    }
}

