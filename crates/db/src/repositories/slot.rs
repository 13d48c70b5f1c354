use crate::models::DbSlot;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

/// Bulk-inserts a freshly generated slot set for a schedule. Runs inside
/// the caller's transaction so a regeneration is all-or-nothing.
pub async fn insert_slots(
    conn: &mut PgConnection,
    schedule_id: Uuid,
    slots: &[(DateTime<Utc>, DateTime<Utc>)],
) -> Result<()> {
    tracing::debug!("Inserting {} slots for schedule {}", slots.len(), schedule_id);

    for (slot_start, slot_end) in slots {
        sqlx::query(
            r#"
            INSERT INTO slots (id, schedule_id, slot_start, slot_end, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(schedule_id)
        .bind(slot_start)
        .bind(slot_end)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

pub async fn get_slots_by_schedule_id<'e>(
    executor: impl PgExecutor<'e>,
    schedule_id: Uuid,
) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, schedule_id, slot_start, slot_end, created_at
        FROM slots
        WHERE schedule_id = $1
        ORDER BY slot_start ASC
        "#,
    )
    .bind(schedule_id)
    .fetch_all(executor)
    .await?;

    Ok(slots)
}

pub async fn delete_slots_by_schedule_id<'e>(
    executor: impl PgExecutor<'e>,
    schedule_id: Uuid,
) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM slots
        WHERE schedule_id = $1
        "#,
    )
    .bind(schedule_id)
    .execute(executor)
    .await?;

    Ok(())
}
