//! Availability-store handlers.
//!
//! A schedule mutation is one transaction: advisory lock on the host,
//! overlap check against the host's other windows, the row write, then a
//! full slot regeneration (bulk delete + bulk insert). Slots are derived
//! data; the schedule row is the authority.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Duration;
use serde::Deserialize;
use slotbook_core::{
    booking,
    errors::BookingError,
    models::schedule::{
        CreateScheduleRequest, GetScheduleResponse, ScheduleResponse, SlotResponse,
        UpdateScheduleRequest,
    },
    slots, time,
};
use slotbook_db::{locks, models::DbSchedule, repositories};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

fn schedule_response(row: DbSchedule, zone: &str) -> Result<ScheduleResponse, BookingError> {
    Ok(ScheduleResponse {
        id: row.id,
        host_id: row.host_id,
        timezone: zone.to_string(),
        window_start: time::to_display(row.window_start, zone)?,
        window_end: time::to_display(row.window_end, zone)?,
        min_duration: row.min_duration,
        max_duration: row.max_duration,
        auto_approve: row.auto_approve,
        created_at: row.created_at,
    })
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    // Normalize wall-clock input to canonical instants at the boundary
    let window_start = time::to_canonical(payload.window_start, &payload.timezone)?;
    let window_end = time::to_canonical(payload.window_end, &payload.timezone)?;

    booking::validate_schedule_bounds(
        window_start,
        window_end,
        payload.min_duration,
        payload.max_duration,
    )?;

    let mut tx = state.db_pool.begin().await?;

    // Serialize against concurrent schedule mutations for the same host
    locks::lock_party(&mut *tx, payload.host_id)
        .await
        .map_err(BookingError::Database)?;

    if repositories::schedule::overlap_exists(
        &mut *tx,
        payload.host_id,
        window_start,
        window_end,
        None,
    )
    .await
    .map_err(BookingError::Database)?
    {
        return Err(AppError(BookingError::ScheduleOverlap(format!(
            "host {} already has a schedule overlapping the requested window",
            payload.host_id
        ))));
    }

    let db_schedule = repositories::schedule::create_schedule(
        &mut *tx,
        payload.host_id,
        window_start,
        window_end,
        payload.min_duration,
        payload.max_duration,
        payload.auto_approve,
    )
    .await
    .map_err(BookingError::Database)?;

    let generated: Vec<_> =
        slots::generate_slots(window_start, window_end, Duration::minutes(payload.min_duration as i64))
            .collect();
    repositories::slot::insert_slots(&mut *tx, db_schedule.id, &generated)
        .await
        .map_err(BookingError::Database)?;

    tx.commit().await?;

    Ok(Json(schedule_response(db_schedule, &payload.timezone)?))
}

#[derive(Debug, Deserialize)]
pub struct GetScheduleQuery {
    /// Narrows the lookup to one host; a mismatch reads as not-found.
    pub host_id: Option<Uuid>,
    /// Display zone for the response time fields (default UTC).
    pub tz: Option<String>,
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<GetScheduleQuery>,
) -> Result<Json<GetScheduleResponse>, AppError> {
    let db_schedule = repositories::schedule::get_schedule_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Schedule with ID {} not found", id)))?;

    if let Some(host_id) = query.host_id {
        if db_schedule.host_id != host_id {
            return Err(AppError(BookingError::NotFound(format!(
                "Schedule with ID {} not found",
                id
            ))));
        }
    }

    let slots = repositories::slot::get_slots_by_schedule_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?;

    let zone = query.tz.as_deref().unwrap_or("UTC");
    let response = GetScheduleResponse {
        schedule: schedule_response(db_schedule, zone)?,
        slots: slots
            .into_iter()
            .map(|slot| {
                Ok(SlotResponse {
                    start: time::to_display(slot.slot_start, zone)?,
                    end: time::to_display(slot.slot_end, zone)?,
                })
            })
            .collect::<Result<Vec<_>, BookingError>>()?,
    };

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct ListSchedulesQuery {
    pub host_id: Uuid,
    pub tz: Option<String>,
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListSchedulesQuery>,
) -> Result<Json<Vec<ScheduleResponse>>, AppError> {
    let schedules = repositories::schedule::list_schedules_by_host(&state.db_pool, query.host_id)
        .await
        .map_err(BookingError::Database)?;

    let zone = query.tz.as_deref().unwrap_or("UTC");
    let response = schedules
        .into_iter()
        .map(|schedule| schedule_response(schedule, zone))
        .collect::<Result<Vec<_>, BookingError>>()?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let mut tx = state.db_pool.begin().await?;

    locks::lock_party(&mut *tx, payload.host_id)
        .await
        .map_err(BookingError::Database)?;

    let existing = repositories::schedule::get_schedule_by_id(&mut *tx, id)
        .await
        .map_err(BookingError::Database)?
        .filter(|schedule| schedule.host_id == payload.host_id)
        .ok_or_else(|| BookingError::NotFound(format!("Schedule with ID {} not found", id)))?;

    // Merge the explicit update-struct over the stored row, normalizing
    // any supplied wall-clock fields, then re-validate the whole result
    let window_start = match payload.window_start {
        Some(local) => time::to_canonical(local, &payload.timezone)?,
        None => existing.window_start,
    };
    let window_end = match payload.window_end {
        Some(local) => time::to_canonical(local, &payload.timezone)?,
        None => existing.window_end,
    };
    let min_duration = payload.min_duration.unwrap_or(existing.min_duration);
    let max_duration = payload.max_duration.unwrap_or(existing.max_duration);
    let auto_approve = payload.auto_approve.unwrap_or(existing.auto_approve);

    booking::validate_schedule_bounds(window_start, window_end, min_duration, max_duration)?;

    if repositories::schedule::overlap_exists(
        &mut *tx,
        payload.host_id,
        window_start,
        window_end,
        Some(id),
    )
    .await
    .map_err(BookingError::Database)?
    {
        return Err(AppError(BookingError::ScheduleOverlap(format!(
            "host {} already has a schedule overlapping the requested window",
            payload.host_id
        ))));
    }

    let updated = repositories::schedule::update_schedule(
        &mut *tx,
        id,
        window_start,
        window_end,
        min_duration,
        max_duration,
        auto_approve,
    )
    .await
    .map_err(BookingError::Database)?;

    // Slots are regenerated wholesale on every update
    repositories::slot::delete_slots_by_schedule_id(&mut *tx, id)
        .await
        .map_err(BookingError::Database)?;
    let generated: Vec<_> =
        slots::generate_slots(window_start, window_end, Duration::minutes(min_duration as i64))
            .collect();
    repositories::slot::insert_slots(&mut *tx, id, &generated)
        .await
        .map_err(BookingError::Database)?;

    tx.commit().await?;

    Ok(Json(schedule_response(updated, &payload.timezone)?))
}

#[derive(Debug, Deserialize)]
pub struct DeleteScheduleQuery {
    pub host_id: Uuid,
}

/// Deletes slots then the schedule. Absent or foreign rows are a no-op
/// success, so repeated deletion is safe.
#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteScheduleQuery>,
) -> Result<StatusCode, AppError> {
    let mut tx = state.db_pool.begin().await?;

    locks::lock_party(&mut *tx, query.host_id)
        .await
        .map_err(BookingError::Database)?;

    let existing = repositories::schedule::get_schedule_by_id(&mut *tx, id)
        .await
        .map_err(BookingError::Database)?;

    if existing.map(|schedule| schedule.host_id) == Some(query.host_id) {
        repositories::slot::delete_slots_by_schedule_id(&mut *tx, id)
            .await
            .map_err(BookingError::Database)?;
        repositories::schedule::delete_schedule(&mut *tx, id, query.host_id)
            .await
            .map_err(BookingError::Database)?;
    }

    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
