use chrono::{DateTime, Utc};
use mockall::mock;
use slotbook_core::booking::PartyRole;
use uuid::Uuid;

use crate::models::{DbSchedule, DbSession, DbSlot};

// Mock repositories for testing
mock! {
    pub ScheduleRepo {
        pub async fn create_schedule(
            &self,
            host_id: Uuid,
            window_start: DateTime<Utc>,
            window_end: DateTime<Utc>,
            min_duration: i32,
            max_duration: i32,
            auto_approve: bool,
        ) -> eyre::Result<DbSchedule>;

        pub async fn overlap_exists(
            &self,
            host_id: Uuid,
            window_start: DateTime<Utc>,
            window_end: DateTime<Utc>,
            exclude: Option<Uuid>,
        ) -> eyre::Result<bool>;

        pub async fn get_schedule_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbSchedule>>;

        pub async fn list_schedules_by_host(
            &self,
            host_id: Uuid,
        ) -> eyre::Result<Vec<DbSchedule>>;

        pub async fn update_schedule(
            &self,
            id: Uuid,
            window_start: DateTime<Utc>,
            window_end: DateTime<Utc>,
            min_duration: i32,
            max_duration: i32,
            auto_approve: bool,
        ) -> eyre::Result<DbSchedule>;

        pub async fn delete_schedule(
            &self,
            id: Uuid,
            host_id: Uuid,
        ) -> eyre::Result<u64>;
    }
}

mock! {
    pub SlotRepo {
        pub async fn insert_slots(
            &self,
            schedule_id: Uuid,
            slots: Vec<(DateTime<Utc>, DateTime<Utc>)>,
        ) -> eyre::Result<()>;

        pub async fn get_slots_by_schedule_id(
            &self,
            schedule_id: Uuid,
        ) -> eyre::Result<Vec<DbSlot>>;

        pub async fn delete_slots_by_schedule_id(
            &self,
            schedule_id: Uuid,
        ) -> eyre::Result<()>;
    }
}

mock! {
    pub SessionRepo {
        pub async fn create_session(
            &self,
            host_id: Uuid,
            guest_id: Uuid,
            schedule_id: Uuid,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
            title: String,
            confirmed: bool,
        ) -> eyre::Result<DbSession>;

        pub async fn get_session_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbSession>>;

        pub async fn get_session_for_host(
            &self,
            id: Uuid,
            host_id: Uuid,
        ) -> eyre::Result<Option<DbSession>>;

        pub async fn list_sessions_by_party(
            &self,
            role: PartyRole,
            party_id: Uuid,
        ) -> eyre::Result<Vec<DbSession>>;

        pub async fn has_confirmed_overlap(
            &self,
            role: PartyRole,
            party_id: Uuid,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
            exclude: Option<Uuid>,
        ) -> eyre::Result<bool>;

        pub async fn duplicate_exists(
            &self,
            schedule_id: Uuid,
            guest_id: Uuid,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
        ) -> eyre::Result<bool>;

        pub async fn confirm_session(
            &self,
            id: Uuid,
        ) -> eyre::Result<DbSession>;

        pub async fn delete_pending_overlapping(
            &self,
            host_id: Uuid,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
            exclude: Uuid,
        ) -> eyre::Result<u64>;

        pub async fn delete_session(
            &self,
            id: Uuid,
        ) -> eyre::Result<u64>;
    }
}
