#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use slotbook_db::mock::repositories::{MockScheduleRepo, MockSessionRepo, MockSlotRepo};
use slotbook_db::models::{DbSchedule, DbSession};
use uuid::Uuid;

/// Mock repositories standing in for the database layer, one per table.
pub struct TestContext {
    pub schedule_repo: MockScheduleRepo,
    pub slot_repo: MockSlotRepo,
    pub session_repo: MockSessionRepo,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            schedule_repo: MockScheduleRepo::new(),
            slot_repo: MockSlotRepo::new(),
            session_repo: MockSessionRepo::new(),
        }
    }
}

pub fn utc(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap()
}

/// A 10:00-12:00 window accepting 30-60 minute sessions.
pub fn db_schedule(host_id: Uuid, auto_approve: bool) -> DbSchedule {
    DbSchedule {
        id: Uuid::new_v4(),
        host_id,
        window_start: utc(10, 0),
        window_end: utc(12, 0),
        min_duration: 30,
        max_duration: 60,
        auto_approve,
        created_at: utc(0, 1),
    }
}

pub fn db_session(
    host_id: Uuid,
    guest_id: Uuid,
    schedule_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    confirmed: bool,
) -> DbSession {
    DbSession {
        id: Uuid::new_v4(),
        host_id,
        guest_id,
        schedule_id,
        start_time: start,
        end_time: end,
        title: "Test Session".to_string(),
        confirmed,
        host_url: None,
        guest_url: None,
        created_at: utc(0, 1),
    }
}
