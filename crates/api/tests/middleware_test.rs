use axum::http::StatusCode;
use axum::response::IntoResponse;
use slotbook_api::middleware::error_handling::AppError;
use slotbook_core::errors::BookingError;

fn status_for(error: BookingError) -> StatusCode {
    AppError(error).into_response().status()
}

#[test]
fn test_validation_errors_map_to_bad_request() {
    assert_eq!(
        status_for(BookingError::InvalidDuration("min > max".into())),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_for(BookingError::WindowTooShort("20 minutes".into())),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_for(BookingError::InvalidTimestamp("bad zone".into())),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_for(BookingError::Validation("missing parameter".into())),
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn test_conflict_errors_map_to_conflict() {
    assert_eq!(
        status_for(BookingError::ScheduleOverlap("window taken".into())),
        StatusCode::CONFLICT
    );
    assert_eq!(
        status_for(BookingError::HostUnavailable("host booked".into())),
        StatusCode::CONFLICT
    );
    assert_eq!(
        status_for(BookingError::GuestUnavailable("guest booked".into())),
        StatusCode::CONFLICT
    );
    assert_eq!(
        status_for(BookingError::DuplicateRequest("same interval".into())),
        StatusCode::CONFLICT
    );
}

#[test]
fn test_terminal_errors() {
    assert_eq!(
        status_for(BookingError::NotFound("no such schedule".into())),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        status_for(BookingError::Unauthorized("not a party".into())),
        StatusCode::FORBIDDEN
    );
}

#[test]
fn test_infrastructure_errors_map_to_internal() {
    assert_eq!(
        status_for(BookingError::Database(eyre::eyre!("connection refused"))),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_eyre_report_converts_to_database_error() {
    let err: AppError = eyre::eyre!("boom").into();
    assert_eq!(
        err.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
