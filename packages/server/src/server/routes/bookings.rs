//! Booking endpoints

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{BookingError, BookingId, BookingResult, InstructorId, UserId};
use crate::domains::bookings::activities;
use crate::domains::bookings::{
    BookingCreatedData, BookingData, BookingStatus, BookingStatusData, BookingWithInstructorData,
    RequestBookingInput,
};
use crate::server::app::AppState;

use super::parse_id;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifiedQuery {
    notified_instructor_id: Option<String>,
    status: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptBody {
    instructor_id: Option<String>,
}

#[derive(Serialize)]
pub struct AcceptResponse {
    message: String,
    booking: BookingData,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    success: bool,
}

/// POST /bookings
pub async fn create_booking_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<RequestBookingInput>, JsonRejection>,
) -> BookingResult<(StatusCode, Json<BookingCreatedData>)> {
    let Json(input) = payload?;
    let booking = activities::request_booking(input, &state.deps).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingCreatedData {
            message: "Booking created and instructors notified.".to_string(),
            booking_id: booking.id,
        }),
    ))
}

/// GET /bookings?notifiedInstructorId=..&status=..
pub async fn list_notified_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<NotifiedQuery>, QueryRejection>,
) -> BookingResult<Json<Vec<BookingData>>> {
    let Query(query) = query?;
    let (Some(instructor_id), Some(status)) = (query.notified_instructor_id, query.status) else {
        return Err(BookingError::InvalidRequest("Missing parameters.".to_string()));
    };

    let instructor_id: InstructorId = parse_id(&instructor_id, "notifiedInstructorId")?;
    let status: BookingStatus = status.parse().map_err(BookingError::InvalidRequest)?;

    let bookings = activities::list_for_instructor(instructor_id, status, &state.deps).await?;
    Ok(Json(bookings))
}

/// GET /bookings/assigned/:instructor_id
pub async fn list_assigned_handler(
    Extension(state): Extension<AppState>,
    Path(instructor_id): Path<String>,
) -> BookingResult<Json<Vec<BookingData>>> {
    let instructor_id: InstructorId = parse_id(&instructor_id, "instructorId")?;
    Ok(Json(activities::list_assigned(instructor_id, &state.deps).await?))
}

/// GET /bookings/user/:user_id
pub async fn list_for_user_handler(
    Extension(state): Extension<AppState>,
    Path(user_id): Path<String>,
) -> BookingResult<Json<Vec<BookingWithInstructorData>>> {
    let user_id: UserId = parse_id(&user_id, "userId")?;
    Ok(Json(activities::list_for_user(user_id, &state.deps).await?))
}

/// GET /bookings/:id/status
pub async fn booking_status_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> BookingResult<Json<BookingStatusData>> {
    let id: BookingId = parse_id(&id, "booking id")?;
    Ok(Json(activities::booking_status(id, &state.deps).await?))
}

/// POST /bookings/:id/accept
pub async fn accept_booking_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AcceptBody>, JsonRejection>,
) -> BookingResult<Json<AcceptResponse>> {
    let id: BookingId = parse_id(&id, "booking id")?;
    let Json(body) = payload?;
    let instructor_id = body
        .instructor_id
        .ok_or_else(|| BookingError::InvalidRequest("Missing instructorId.".to_string()))?;
    let instructor_id: InstructorId = parse_id(&instructor_id, "instructorId")?;

    let booking = activities::accept_booking(id, instructor_id, &state.deps).await?;

    Ok(Json(AcceptResponse {
        message: "Booking confirmed and assigned to you.".to_string(),
        booking: booking.into(),
    }))
}

/// DELETE /bookings/:id
pub async fn delete_booking_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> BookingResult<Json<DeletedResponse>> {
    let id: BookingId = parse_id(&id, "booking id")?;
    activities::delete_booking(id, &state.deps).await?;
    Ok(Json(DeletedResponse { success: true }))
}
