use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create schedules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            host_id UUID NOT NULL,
            window_start TIMESTAMP WITH TIME ZONE NOT NULL,
            window_end TIMESTAMP WITH TIME ZONE NOT NULL,
            min_duration INTEGER NOT NULL,
            max_duration INTEGER NOT NULL,
            auto_approve BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_window CHECK (window_end > window_start),
            CONSTRAINT valid_durations CHECK (min_duration > 0 AND min_duration <= max_duration)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            schedule_id UUID NOT NULL REFERENCES schedules(id) ON DELETE CASCADE,
            slot_start TIMESTAMP WITH TIME ZONE NOT NULL,
            slot_end TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_slot_range CHECK (slot_end > slot_start)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create sessions table. schedule_id carries no foreign key: schedule
    // deletion is independent of session history.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            host_id UUID NOT NULL,
            guest_id UUID NOT NULL,
            schedule_id UUID NOT NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            title VARCHAR(255) NOT NULL,
            confirmed BOOLEAN NOT NULL DEFAULT FALSE,
            host_url TEXT NULL,
            guest_url TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_session_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_schedules_host_id ON schedules(host_id);
        CREATE INDEX IF NOT EXISTS idx_slots_schedule_id ON slots(schedule_id);
        CREATE INDEX IF NOT EXISTS idx_slots_slot_start ON slots(slot_start);
        CREATE INDEX IF NOT EXISTS idx_sessions_host_id ON sessions(host_id);
        CREATE INDEX IF NOT EXISTS idx_sessions_guest_id ON sessions(guest_id);
        CREATE INDEX IF NOT EXISTS idx_sessions_schedule_id ON sessions(schedule_id);
        CREATE INDEX IF NOT EXISTS idx_sessions_start_time ON sessions(start_time);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
