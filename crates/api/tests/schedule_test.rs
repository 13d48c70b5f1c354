mod common;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use common::{db_schedule, utc, TestContext};
use mockall::predicate;
use pretty_assertions::assert_eq;
use slotbook_api::middleware::error_handling::AppError;
use slotbook_core::{booking, errors::BookingError, slots, time};
use slotbook_db::models::DbSchedule;
use uuid::Uuid;

fn local(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 2)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

// Mirrors the create-schedule handler's decision sequence against mock
// repositories: normalize, validate bounds, overlap check, insert,
// generate and store slots.
async fn create_schedule_wrapper(
    ctx: &mut TestContext,
    host_id: Uuid,
    timezone: &str,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
    min_duration: i32,
    max_duration: i32,
    auto_approve: bool,
) -> Result<DbSchedule, AppError> {
    let window_start = time::to_canonical(window_start, timezone)?;
    let window_end = time::to_canonical(window_end, timezone)?;

    booking::validate_schedule_bounds(window_start, window_end, min_duration, max_duration)?;

    if ctx
        .schedule_repo
        .overlap_exists(host_id, window_start, window_end, None)
        .await?
    {
        return Err(AppError(BookingError::ScheduleOverlap(
            "window overlaps an existing schedule".into(),
        )));
    }

    let schedule = ctx
        .schedule_repo
        .create_schedule(
            host_id,
            window_start,
            window_end,
            min_duration,
            max_duration,
            auto_approve,
        )
        .await?;

    let generated: Vec<_> =
        slots::generate_slots(window_start, window_end, Duration::minutes(min_duration as i64))
            .collect();
    ctx.slot_repo.insert_slots(schedule.id, generated).await?;

    Ok(schedule)
}

#[tokio::test]
async fn test_create_schedule_success_generates_slots() {
    let mut ctx = TestContext::new();
    let host_id = Uuid::new_v4();
    let schedule = db_schedule(host_id, false);
    let schedule_id = schedule.id;

    ctx.schedule_repo
        .expect_overlap_exists()
        .returning(|_, _, _, _| Ok(false));

    ctx.schedule_repo
        .expect_create_schedule()
        .with(
            predicate::eq(host_id),
            predicate::eq(utc(10, 0)),
            predicate::eq(utc(12, 0)),
            predicate::eq(30),
            predicate::eq(60),
            predicate::eq(false),
        )
        .returning(move |_, _, _, _, _, _| Ok(schedule.clone()));

    // A 120-minute window at 30-minute granularity materializes 4 slots
    ctx.slot_repo
        .expect_insert_slots()
        .with(
            predicate::eq(schedule_id),
            predicate::function(|slots: &Vec<(DateTime<Utc>, DateTime<Utc>)>| slots.len() == 4),
        )
        .times(1)
        .returning(|_, _| Ok(()));

    let result = create_schedule_wrapper(
        &mut ctx,
        host_id,
        "UTC",
        local(10, 0),
        local(12, 0),
        30,
        60,
        false,
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().id, schedule_id);
}

#[tokio::test]
async fn test_create_schedule_normalizes_zone_before_storing() {
    let mut ctx = TestContext::new();
    let host_id = Uuid::new_v4();
    let schedule = db_schedule(host_id, false);

    // 10:00 New York wall clock on 2025-06-02 (EDT) is 14:00 UTC
    ctx.schedule_repo
        .expect_overlap_exists()
        .with(
            predicate::eq(host_id),
            predicate::eq(utc(14, 0)),
            predicate::eq(utc(16, 0)),
            predicate::eq(None),
        )
        .returning(|_, _, _, _| Ok(false));

    ctx.schedule_repo
        .expect_create_schedule()
        .with(
            predicate::eq(host_id),
            predicate::eq(utc(14, 0)),
            predicate::eq(utc(16, 0)),
            predicate::always(),
            predicate::always(),
            predicate::always(),
        )
        .returning(move |_, _, _, _, _, _| Ok(schedule.clone()));

    ctx.slot_repo
        .expect_insert_slots()
        .returning(|_, _| Ok(()));

    let result = create_schedule_wrapper(
        &mut ctx,
        host_id,
        "America/New_York",
        local(10, 0),
        local(12, 0),
        30,
        60,
        false,
    )
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_schedule_window_too_short() {
    let mut ctx = TestContext::new();

    // 09:00-09:20 cannot fit a 30-minute minimum; nothing reaches the store
    let result = create_schedule_wrapper(
        &mut ctx,
        Uuid::new_v4(),
        "UTC",
        local(9, 0),
        local(9, 20),
        30,
        60,
        false,
    )
    .await;

    match result.unwrap_err().0 {
        BookingError::WindowTooShort(_) => {}
        e => panic!("Expected WindowTooShort error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_create_schedule_invalid_durations() {
    let mut ctx = TestContext::new();

    let result = create_schedule_wrapper(
        &mut ctx,
        Uuid::new_v4(),
        "UTC",
        local(10, 0),
        local(12, 0),
        60,
        30,
        false,
    )
    .await;

    match result.unwrap_err().0 {
        BookingError::InvalidDuration(_) => {}
        e => panic!("Expected InvalidDuration error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_create_schedule_overlapping_window_rejected() {
    let mut ctx = TestContext::new();
    let host_id = Uuid::new_v4();

    // The host already holds 10:30-11:30; the overlap test runs against it
    let existing_start = utc(10, 30);
    let existing_end = utc(11, 30);
    ctx.schedule_repo
        .expect_overlap_exists()
        .returning(move |_, start, end, _| {
            Ok(booking::overlaps(start, end, existing_start, existing_end))
        });

    let result = create_schedule_wrapper(
        &mut ctx,
        host_id,
        "UTC",
        local(10, 0),
        local(11, 0),
        30,
        60,
        false,
    )
    .await;

    match result.unwrap_err().0 {
        BookingError::ScheduleOverlap(_) => {}
        e => panic!("Expected ScheduleOverlap error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_create_schedule_adjacent_window_allowed() {
    let mut ctx = TestContext::new();
    let host_id = Uuid::new_v4();
    let schedule = db_schedule(host_id, false);

    let existing_start = utc(10, 30);
    let existing_end = utc(11, 30);
    ctx.schedule_repo
        .expect_overlap_exists()
        .returning(move |_, start, end, _| {
            Ok(booking::overlaps(start, end, existing_start, existing_end))
        });

    ctx.schedule_repo
        .expect_create_schedule()
        .returning(move |_, _, _, _, _, _| Ok(schedule.clone()));

    ctx.slot_repo
        .expect_insert_slots()
        .returning(|_, _| Ok(()));

    // 11:30-12:30 touches the existing window without overlapping it
    let result = create_schedule_wrapper(
        &mut ctx,
        host_id,
        "UTC",
        local(11, 30),
        local(12, 30),
        30,
        60,
        false,
    )
    .await;

    assert!(result.is_ok());
}

#[test]
fn test_schedule_round_trip_through_zone_boundary() {
    // What a host submits is what they read back, for any display zone
    let zone = "America/New_York";
    let submitted_start = local(10, 0);
    let submitted_end = local(12, 0);

    let stored_start = time::to_canonical(submitted_start, zone).unwrap();
    let stored_end = time::to_canonical(submitted_end, zone).unwrap();

    assert_eq!(time::to_display(stored_start, zone).unwrap(), submitted_start);
    assert_eq!(time::to_display(stored_end, zone).unwrap(), submitted_end);
}

// Mirrors the update-schedule handler: merge, re-validate, overlap check
// excluding the schedule itself, then full slot regeneration.
async fn update_schedule_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
    host_id: Uuid,
    new_max_duration: Option<i32>,
) -> Result<DbSchedule, AppError> {
    let existing = ctx
        .schedule_repo
        .get_schedule_by_id(id)
        .await?
        .filter(|schedule| schedule.host_id == host_id)
        .ok_or_else(|| BookingError::NotFound(format!("Schedule with ID {} not found", id)))?;

    let max_duration = new_max_duration.unwrap_or(existing.max_duration);
    booking::validate_schedule_bounds(
        existing.window_start,
        existing.window_end,
        existing.min_duration,
        max_duration,
    )?;

    if ctx
        .schedule_repo
        .overlap_exists(host_id, existing.window_start, existing.window_end, Some(id))
        .await?
    {
        return Err(AppError(BookingError::ScheduleOverlap(
            "window overlaps an existing schedule".into(),
        )));
    }

    let updated = ctx
        .schedule_repo
        .update_schedule(
            id,
            existing.window_start,
            existing.window_end,
            existing.min_duration,
            max_duration,
            existing.auto_approve,
        )
        .await?;

    ctx.slot_repo.delete_slots_by_schedule_id(id).await?;
    let generated: Vec<_> = slots::generate_slots(
        updated.window_start,
        updated.window_end,
        Duration::minutes(updated.min_duration as i64),
    )
    .collect();
    ctx.slot_repo.insert_slots(id, generated).await?;

    Ok(updated)
}

#[tokio::test]
async fn test_update_schedule_merges_and_regenerates_slots() {
    let mut ctx = TestContext::new();
    let host_id = Uuid::new_v4();
    let schedule = db_schedule(host_id, false);
    let id = schedule.id;

    let fetched = schedule.clone();
    ctx.schedule_repo
        .expect_get_schedule_by_id()
        .with(predicate::eq(id))
        .returning(move |_| Ok(Some(fetched.clone())));

    // The overlap check must exclude the schedule being updated
    ctx.schedule_repo
        .expect_overlap_exists()
        .with(
            predicate::always(),
            predicate::always(),
            predicate::always(),
            predicate::eq(Some(id)),
        )
        .returning(|_, _, _, _| Ok(false));

    ctx.schedule_repo
        .expect_update_schedule()
        .with(
            predicate::eq(id),
            predicate::eq(utc(10, 0)),
            predicate::eq(utc(12, 0)),
            predicate::eq(30),
            predicate::eq(90),
            predicate::eq(false),
        )
        .returning(move |_, _, _, _, _, _| {
            let mut updated = schedule.clone();
            updated.max_duration = 90;
            Ok(updated)
        });

    ctx.slot_repo
        .expect_delete_slots_by_schedule_id()
        .with(predicate::eq(id))
        .times(1)
        .returning(|_| Ok(()));

    ctx.slot_repo
        .expect_insert_slots()
        .with(
            predicate::eq(id),
            predicate::function(|slots: &Vec<(DateTime<Utc>, DateTime<Utc>)>| slots.len() == 4),
        )
        .times(1)
        .returning(|_, _| Ok(()));

    let result = update_schedule_wrapper(&mut ctx, id, host_id, Some(90)).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().max_duration, 90);
}

#[tokio::test]
async fn test_update_schedule_wrong_host_reads_as_not_found() {
    let mut ctx = TestContext::new();
    let schedule = db_schedule(Uuid::new_v4(), false);
    let id = schedule.id;

    ctx.schedule_repo
        .expect_get_schedule_by_id()
        .returning(move |_| Ok(Some(schedule.clone())));

    let result = update_schedule_wrapper(&mut ctx, id, Uuid::new_v4(), Some(90)).await;

    match result.unwrap_err().0 {
        BookingError::NotFound(_) => {}
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}
