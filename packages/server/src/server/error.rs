//! HTTP mapping for domain errors.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::common::BookingError;

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

pub fn status_for(error: &BookingError) -> StatusCode {
    match error {
        BookingError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        BookingError::NoInstructorsInLocation
        | BookingError::NoInstructorsForCourse
        | BookingError::NoInstructorAvailable
        | BookingError::NotFound(_)
        | BookingError::SlotNotFound => StatusCode::NOT_FOUND,
        BookingError::BookingAlreadyResolved | BookingError::EmailTaken => StatusCode::CONFLICT,
        BookingError::InstructorNotNotified => StatusCode::FORBIDDEN,
        BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// Tell axum how to convert `BookingError` into a response.
impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = status_for(&self);

        let message = match &self {
            BookingError::Internal(e) => {
                tracing::error!(error = ?e, "Request failed");
                "Server error".to_string()
            }
            BookingError::BookingAlreadyResolved => {
                tracing::info!("Accept lost to an earlier one");
                self.to_string()
            }
            other => {
                tracing::debug!(error = %other, status = %status, "Request rejected");
                other.to_string()
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<JsonRejection> for BookingError {
    fn from(rejection: JsonRejection) -> Self {
        BookingError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for BookingError {
    fn from(rejection: QueryRejection) -> Self {
        BookingError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for BookingError {
    fn from(rejection: PathRejection) -> Self {
        BookingError::InvalidRequest(rejection.body_text())
    }
}
