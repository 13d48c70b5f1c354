use crate::models::DbSession;
use chrono::{DateTime, Utc};
use eyre::Result;
use slotbook_core::booking::PartyRole;
use sqlx::{PgConnection, PgExecutor, Pool, Postgres};
use uuid::Uuid;

pub async fn create_session(
    conn: &mut PgConnection,
    host_id: Uuid,
    guest_id: Uuid,
    schedule_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    title: &str,
    confirmed: bool,
) -> Result<DbSession> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating session: id={}, host={}, guest={}, confirmed={}",
        id, host_id, guest_id, confirmed
    );

    let session = sqlx::query_as::<_, DbSession>(
        r#"
        INSERT INTO sessions (id, host_id, guest_id, schedule_id, start_time, end_time, title, confirmed, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, host_id, guest_id, schedule_id, start_time, end_time, title, confirmed, host_url, guest_url, created_at
        "#,
    )
    .bind(id)
    .bind(host_id)
    .bind(guest_id)
    .bind(schedule_id)
    .bind(start_time)
    .bind(end_time)
    .bind(title)
    .bind(confirmed)
    .bind(now)
    .fetch_one(conn)
    .await?;

    Ok(session)
}

pub async fn get_session_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<DbSession>> {
    let session = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT id, host_id, guest_id, schedule_id, start_time, end_time, title, confirmed, host_url, guest_url, created_at
        FROM sessions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(session)
}

pub async fn get_session_for_host<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    host_id: Uuid,
) -> Result<Option<DbSession>> {
    let session = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT id, host_id, guest_id, schedule_id, start_time, end_time, title, confirmed, host_url, guest_url, created_at
        FROM sessions
        WHERE id = $1 AND host_id = $2
        "#,
    )
    .bind(id)
    .bind(host_id)
    .fetch_optional(executor)
    .await?;

    Ok(session)
}

pub async fn list_sessions_by_party(
    pool: &Pool<Postgres>,
    role: PartyRole,
    party_id: Uuid,
) -> Result<Vec<DbSession>> {
    let query = match role {
        PartyRole::Host => {
            r#"
            SELECT id, host_id, guest_id, schedule_id, start_time, end_time, title, confirmed, host_url, guest_url, created_at
            FROM sessions
            WHERE host_id = $1
            ORDER BY start_time ASC
            "#
        }
        PartyRole::Guest => {
            r#"
            SELECT id, host_id, guest_id, schedule_id, start_time, end_time, title, confirmed, host_url, guest_url, created_at
            FROM sessions
            WHERE guest_id = $1
            ORDER BY start_time ASC
            "#
        }
    };

    let sessions = sqlx::query_as::<_, DbSession>(query)
        .bind(party_id)
        .fetch_all(pool)
        .await?;

    Ok(sessions)
}

/// Confirmed-session conflict scan for one party in one role. Half-open
/// overlap: adjacent sessions do not conflict. `exclude` skips a session
/// being re-checked against itself.
pub async fn has_confirmed_overlap(
    conn: &mut PgConnection,
    role: PartyRole,
    party_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> Result<bool> {
    let query = match role {
        PartyRole::Host => {
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM sessions
                WHERE host_id = $1
                  AND confirmed
                  AND ($4::uuid IS NULL OR id <> $4)
                  AND NOT (start_time >= $3 OR end_time <= $2)
            );
            "#
        }
        PartyRole::Guest => {
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM sessions
                WHERE guest_id = $1
                  AND confirmed
                  AND ($4::uuid IS NULL OR id <> $4)
                  AND NOT (start_time >= $3 OR end_time <= $2)
            );
            "#
        }
    };

    let exists = sqlx::query_scalar::<_, bool>(query)
        .bind(party_id)
        .bind(start_time)
        .bind(end_time)
        .bind(exclude)
        .fetch_one(conn)
        .await?;

    Ok(exists)
}

/// True when the guest already holds a pending or confirmed session on
/// this exact (schedule, start, end) tuple.
pub async fn duplicate_exists(
    conn: &mut PgConnection,
    schedule_id: Uuid,
    guest_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM sessions
            WHERE schedule_id = $1
              AND guest_id = $2
              AND start_time = $3
              AND end_time = $4
        );
        "#,
    )
    .bind(schedule_id)
    .bind(guest_id)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(conn)
    .await?;

    Ok(exists)
}

pub async fn confirm_session(conn: &mut PgConnection, id: Uuid) -> Result<DbSession> {
    tracing::debug!("Confirming session: id={}", id);

    let session = sqlx::query_as::<_, DbSession>(
        r#"
        UPDATE sessions
        SET confirmed = TRUE
        WHERE id = $1
        RETURNING id, host_id, guest_id, schedule_id, start_time, end_time, title, confirmed, host_url, guest_url, created_at
        "#,
    )
    .bind(id)
    .fetch_one(conn)
    .await?;

    Ok(session)
}

/// Prunes the host's pending sessions whose interval overlaps a
/// just-confirmed one. The confirmed session itself is excluded. Returns
/// the number of rows removed.
pub async fn delete_pending_overlapping(
    conn: &mut PgConnection,
    host_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    exclude: Uuid,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE host_id = $1
          AND NOT confirmed
          AND id <> $4
          AND NOT (start_time >= $3 OR end_time <= $2)
        "#,
    )
    .bind(host_id)
    .bind(start_time)
    .bind(end_time)
    .bind(exclude)
    .execute(conn)
    .await?;

    let pruned = result.rows_affected();
    if pruned > 0 {
        tracing::debug!("Pruned {} pending sessions for host {}", pruned, host_id);
    }

    Ok(pruned)
}

pub async fn set_meeting_urls<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    host_url: &str,
    guest_url: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE sessions
        SET host_url = $2, guest_url = $3
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(host_url)
    .bind(guest_url)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn delete_session<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}
