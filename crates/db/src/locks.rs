//! Advisory locking for booking-critical sections.
//!
//! The "load confirmed sessions, test overlap, write" sequences in the
//! booking resolver and approval workflow must be serialized per party:
//! two concurrent requests for the same host and overlapping intervals
//! must not both observe "no conflict" and both commit. Transaction-scoped
//! advisory locks keyed on the party id provide that mutual exclusion
//! without table-wide serialization; they release automatically at commit
//! or rollback.

use eyre::Result;
use sqlx::PgConnection;
use uuid::Uuid;

/// Derives the 64-bit advisory lock key from a party id. Truncation can
/// collide across distinct ids, which only widens a critical section,
/// never narrows one.
fn lock_key(party_id: Uuid) -> i64 {
    party_id.as_u128() as i64
}

/// Takes the transaction-scoped advisory lock for one party.
pub async fn lock_party(conn: &mut PgConnection, party_id: Uuid) -> Result<()> {
    tracing::debug!("Acquiring advisory lock for party {}", party_id);
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(lock_key(party_id))
        .execute(conn)
        .await?;
    Ok(())
}

/// Takes the locks for both parties of a session in ascending key order,
/// so two transactions locking the same pair cannot deadlock.
pub async fn lock_parties(conn: &mut PgConnection, a: Uuid, b: Uuid) -> Result<()> {
    let (first, second) = if lock_key(a) <= lock_key(b) {
        (a, b)
    } else {
        (b, a)
    };
    lock_party(conn, first).await?;
    if second != first {
        lock_party(conn, second).await?;
    }
    Ok(())
}
