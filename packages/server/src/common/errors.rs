use thiserror::Error;

use super::schedule::ScheduleError;

/// Failures surfaced by the booking, matching and instructor operations.
///
/// Every variant maps to a caller-visible status in `server::error`; store
/// errors are wrapped in `Internal` and never shown verbatim.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No instructors available for the selected date and location.")]
    NoInstructorsInLocation,

    #[error("No instructors found who offer this course in the selected location.")]
    NoInstructorsForCourse,

    #[error("No instructor found. Please change the time or date.")]
    NoInstructorAvailable,

    #[error("Booking already taken or not found.")]
    BookingAlreadyResolved,

    #[error("Instructor was not offered this booking.")]
    InstructorNotNotified,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Slot not found")]
    SlotNotFound,

    #[error("Email already registered.")]
    EmailTaken,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for BookingError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.into())
    }
}

impl From<ScheduleError> for BookingError {
    fn from(err: ScheduleError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
