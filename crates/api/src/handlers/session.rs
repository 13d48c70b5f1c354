//! Booking-resolver and approval-workflow handlers.
//!
//! Both flows run their read-check-write sequence inside one transaction
//! holding advisory locks on the affected parties, so two concurrent
//! requests for overlapping intervals cannot both observe "no conflict"
//! and both commit as confirmed. External side-effects (meeting links,
//! notifications) run after commit and never roll a booking back.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use slotbook_core::{
    booking::{self, PartyRole},
    errors::BookingError,
    models::schedule::Schedule,
    models::session::{ApproveSessionRequest, CreateSessionRequest, SessionResponse},
    services::NotifyEvent,
    time,
};
use slotbook_db::{locks, models::DbSession, repositories};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

fn session_response(row: DbSession, zone: &str) -> Result<SessionResponse, BookingError> {
    Ok(SessionResponse {
        id: row.id,
        host_id: row.host_id,
        guest_id: row.guest_id,
        schedule_id: row.schedule_id,
        timezone: zone.to_string(),
        start: time::to_display(row.start_time, zone)?,
        end: time::to_display(row.end_time, zone)?,
        title: row.title,
        confirmed: row.confirmed,
        host_url: row.host_url,
        guest_url: row.guest_url,
        created_at: row.created_at,
    })
}

/// Post-commit side-effects of a confirmation. The session is already
/// durable; a provisioning or notification failure downgrades the result
/// to "confirmed without links", never to a rollback.
async fn run_confirmation_side_effects(state: &ApiState, mut session: DbSession) -> DbSession {
    match state
        .meetings
        .provision_meeting(&session.title, session.start_time)
        .await
    {
        Ok(links) => {
            match repositories::session::set_meeting_urls(
                &state.db_pool,
                session.id,
                &links.host_url,
                &links.guest_url,
            )
            .await
            {
                Ok(()) => {
                    session.host_url = Some(links.host_url);
                    session.guest_url = Some(links.guest_url);
                }
                Err(e) => {
                    tracing::warn!("Failed to store meeting links for session {}: {}", session.id, e)
                }
            }
        }
        Err(e) => {
            tracing::warn!("Meeting provisioning failed for session {}: {}", session.id, e)
        }
    }

    let payload = json!({
        "session_id": session.id,
        "title": session.title.clone(),
        "start_time": session.start_time,
        "end_time": session.end_time,
    });
    for recipient in [session.host_id, session.guest_id] {
        if let Err(e) = state
            .notifier
            .notify(recipient, NotifyEvent::SessionConfirmed, payload.clone())
            .await
        {
            tracing::warn!("Notification to {} failed: {}", recipient, e);
        }
    }

    session
}

#[axum::debug_handler]
pub async fn request_session(
    State(state): State<Arc<ApiState>>,
    Path(schedule_id): Path<Uuid>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let start = time::to_canonical(payload.start, &payload.timezone)?;
    let end = time::to_canonical(payload.end, &payload.timezone)?;

    let mut tx = state.db_pool.begin().await?;

    // The schedule is re-read on every booking; slot rows are display
    // data and the window may have changed since they were shown.
    let schedule: Schedule = repositories::schedule::get_schedule_by_id(&mut *tx, schedule_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Schedule with ID {} not found", schedule_id))
        })?
        .into();

    booking::validate_session_interval(&schedule, start, end)?;

    locks::lock_parties(&mut *tx, schedule.host_id, payload.guest_id)
        .await
        .map_err(BookingError::Database)?;

    if repositories::session::duplicate_exists(
        &mut *tx,
        schedule_id,
        payload.guest_id,
        start,
        end,
    )
    .await
    .map_err(BookingError::Database)?
    {
        return Err(AppError(BookingError::DuplicateRequest(format!(
            "guest {} already has a request for this exact interval",
            payload.guest_id
        ))));
    }

    if repositories::session::has_confirmed_overlap(
        &mut *tx,
        PartyRole::Host,
        schedule.host_id,
        start,
        end,
        None,
    )
    .await
    .map_err(BookingError::Database)?
    {
        return Err(AppError(BookingError::HostUnavailable(format!(
            "host {} has a confirmed session overlapping the requested interval",
            schedule.host_id
        ))));
    }

    if repositories::session::has_confirmed_overlap(
        &mut *tx,
        PartyRole::Guest,
        payload.guest_id,
        start,
        end,
        None,
    )
    .await
    .map_err(BookingError::Database)?
    {
        return Err(AppError(BookingError::GuestUnavailable(format!(
            "guest {} has a confirmed session overlapping the requested interval",
            payload.guest_id
        ))));
    }

    let session = repositories::session::create_session(
        &mut *tx,
        schedule.host_id,
        payload.guest_id,
        schedule_id,
        start,
        end,
        &payload.title,
        schedule.auto_approve,
    )
    .await
    .map_err(BookingError::Database)?;

    // An auto-approved booking is a confirmation: the host's pending
    // alternatives for this interval become impossible and go away in
    // the same transaction.
    if session.confirmed {
        repositories::session::delete_pending_overlapping(
            &mut *tx,
            session.host_id,
            session.start_time,
            session.end_time,
            session.id,
        )
        .await
        .map_err(BookingError::Database)?;
    }

    tx.commit().await?;

    let session = if session.confirmed {
        run_confirmation_side_effects(&state, session).await
    } else {
        session
    };

    Ok(Json(session_response(session, &payload.timezone)?))
}

#[axum::debug_handler]
pub async fn approve_session(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApproveSessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut tx = state.db_pool.begin().await?;

    let existing = repositories::session::get_session_for_host(&mut *tx, id, payload.host_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Session with ID {} not found", id)))?;

    // Re-approving a confirmed session is a no-op success
    if existing.confirmed {
        return Ok(Json(session_response(existing, "UTC")?));
    }

    locks::lock_parties(&mut *tx, existing.host_id, existing.guest_id)
        .await
        .map_err(BookingError::Database)?;

    // A pending request can be overtaken by a confirmed commitment on
    // either calendar while it waits; approving it then would break
    // confirmed exclusivity.
    if repositories::session::has_confirmed_overlap(
        &mut *tx,
        PartyRole::Host,
        existing.host_id,
        existing.start_time,
        existing.end_time,
        Some(existing.id),
    )
    .await
    .map_err(BookingError::Database)?
    {
        return Err(AppError(BookingError::HostUnavailable(format!(
            "host {} has a confirmed session overlapping this request",
            existing.host_id
        ))));
    }

    if repositories::session::has_confirmed_overlap(
        &mut *tx,
        PartyRole::Guest,
        existing.guest_id,
        existing.start_time,
        existing.end_time,
        Some(existing.id),
    )
    .await
    .map_err(BookingError::Database)?
    {
        return Err(AppError(BookingError::GuestUnavailable(format!(
            "guest {} has a confirmed session overlapping this request",
            existing.guest_id
        ))));
    }

    let confirmed = repositories::session::confirm_session(&mut *tx, id)
        .await
        .map_err(BookingError::Database)?;

    // Prune the host's pending inbox of now-impossible alternatives
    repositories::session::delete_pending_overlapping(
        &mut *tx,
        confirmed.host_id,
        confirmed.start_time,
        confirmed.end_time,
        confirmed.id,
    )
    .await
    .map_err(BookingError::Database)?;

    tx.commit().await?;

    let confirmed = run_confirmation_side_effects(&state, confirmed).await;

    Ok(Json(session_response(confirmed, "UTC")?))
}

#[derive(Debug, Deserialize)]
pub struct GetSessionQuery {
    pub tz: Option<String>,
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<GetSessionQuery>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = repositories::session::get_session_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Session with ID {} not found", id)))?;

    let zone = query.tz.as_deref().unwrap_or("UTC");
    Ok(Json(session_response(session, zone)?))
}

#[derive(Debug, Deserialize)]
pub struct ListSessionsQuery {
    pub host_id: Option<Uuid>,
    pub guest_id: Option<Uuid>,
    pub tz: Option<String>,
}

#[axum::debug_handler]
pub async fn list_sessions(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListSessionsQuery>,
) -> Result<Json<Vec<SessionResponse>>, AppError> {
    let (role, party_id) = match (query.host_id, query.guest_id) {
        (Some(host_id), None) => (PartyRole::Host, host_id),
        (None, Some(guest_id)) => (PartyRole::Guest, guest_id),
        _ => {
            return Err(AppError(BookingError::Validation(
                "Exactly one of host_id or guest_id must be provided".to_string(),
            )))
        }
    };

    let sessions = repositories::session::list_sessions_by_party(&state.db_pool, role, party_id)
        .await
        .map_err(BookingError::Database)?;

    let zone = query.tz.as_deref().unwrap_or("UTC");
    let response = sessions
        .into_iter()
        .map(|session| session_response(session, zone))
        .collect::<Result<Vec<_>, BookingError>>()?;

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct DeleteSessionQuery {
    pub caller_id: Uuid,
}

/// Either party may cancel at any time; anyone else is rejected. An
/// already-absent session deletes as a no-op success.
#[axum::debug_handler]
pub async fn delete_session(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteSessionQuery>,
) -> Result<StatusCode, AppError> {
    let session = repositories::session::get_session_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?;

    let Some(session) = session else {
        return Ok(StatusCode::NO_CONTENT);
    };

    if query.caller_id != session.host_id && query.caller_id != session.guest_id {
        return Err(AppError(BookingError::Unauthorized(format!(
            "caller {} is neither host nor guest of session {}",
            query.caller_id, id
        ))));
    }

    repositories::session::delete_session(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?;

    let payload = json!({
        "session_id": session.id,
        "title": session.title,
        "start_time": session.start_time,
        "end_time": session.end_time,
    });
    for recipient in [session.host_id, session.guest_id] {
        if let Err(e) = state
            .notifier
            .notify(recipient, NotifyEvent::SessionCancelled, payload.clone())
            .await
        {
            tracing::warn!("Notification to {} failed: {}", recipient, e);
        }
    }

    Ok(StatusCode::NO_CONTENT)
}
