use thiserror::Error;

/// Domain errors for the booking engine.
///
/// Each validation and conflict check maps to exactly one variant so
/// callers can render a precise message. Validation errors are recoverable
/// by correcting the input; conflict errors depend on current state and may
/// be retried with different parameters; not-found and authorization errors
/// are terminal.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Window too short: {0}")]
    WindowTooShort(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Schedule overlap: {0}")]
    ScheduleOverlap(String),

    #[error("Duplicate request: {0}")]
    DuplicateRequest(String),

    #[error("Host unavailable: {0}")]
    HostUnavailable(String),

    #[error("Guest unavailable: {0}")]
    GuestUnavailable(String),

    #[error("Authorization error: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;
