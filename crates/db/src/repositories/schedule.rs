use crate::models::DbSchedule;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{PgConnection, PgExecutor, Pool, Postgres};
use uuid::Uuid;

pub async fn create_schedule(
    conn: &mut PgConnection,
    host_id: Uuid,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    min_duration: i32,
    max_duration: i32,
    auto_approve: bool,
) -> Result<DbSchedule> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating schedule: id={}, host={}, window={}..{}",
        id, host_id, window_start, window_end
    );

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        INSERT INTO schedules (id, host_id, window_start, window_end, min_duration, max_duration, auto_approve, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, host_id, window_start, window_end, min_duration, max_duration, auto_approve, created_at
        "#,
    )
    .bind(id)
    .bind(host_id)
    .bind(window_start)
    .bind(window_end)
    .bind(min_duration)
    .bind(max_duration)
    .bind(auto_approve)
    .bind(now)
    .fetch_one(conn)
    .await?;

    Ok(schedule)
}

/// Strict half-open overlap test against the host's existing windows.
/// `exclude` skips the schedule being updated.
pub async fn overlap_exists(
    conn: &mut PgConnection,
    host_id: Uuid,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM schedules
            WHERE host_id = $1
              AND ($4::uuid IS NULL OR id <> $4)
              AND NOT (window_start >= $3 OR window_end <= $2)
        );
        "#,
    )
    .bind(host_id)
    .bind(window_start)
    .bind(window_end)
    .bind(exclude)
    .fetch_one(conn)
    .await?;

    Ok(exists)
}

pub async fn get_schedule_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<DbSchedule>> {
    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, host_id, window_start, window_end, min_duration, max_duration, auto_approve, created_at
        FROM schedules
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(schedule)
}

pub async fn list_schedules_by_host(
    pool: &Pool<Postgres>,
    host_id: Uuid,
) -> Result<Vec<DbSchedule>> {
    let schedules = sqlx::query_as::<_, DbSchedule>(
        r#"
        SELECT id, host_id, window_start, window_end, min_duration, max_duration, auto_approve, created_at
        FROM schedules
        WHERE host_id = $1
        ORDER BY window_start ASC
        "#,
    )
    .bind(host_id)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

pub async fn update_schedule(
    conn: &mut PgConnection,
    id: Uuid,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    min_duration: i32,
    max_duration: i32,
    auto_approve: bool,
) -> Result<DbSchedule> {
    tracing::debug!("Updating schedule: id={}", id);

    let schedule = sqlx::query_as::<_, DbSchedule>(
        r#"
        UPDATE schedules
        SET window_start = $2, window_end = $3, min_duration = $4, max_duration = $5, auto_approve = $6
        WHERE id = $1
        RETURNING id, host_id, window_start, window_end, min_duration, max_duration, auto_approve, created_at
        "#,
    )
    .bind(id)
    .bind(window_start)
    .bind(window_end)
    .bind(min_duration)
    .bind(max_duration)
    .bind(auto_approve)
    .fetch_one(conn)
    .await?;

    Ok(schedule)
}

/// Returns the number of rows removed; zero when the schedule was already
/// absent, which callers treat as success.
pub async fn delete_schedule(conn: &mut PgConnection, id: Uuid, host_id: Uuid) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM schedules
        WHERE id = $1 AND host_id = $2
        "#,
    )
    .bind(id)
    .bind(host_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}
