//! Instructor directory, availability and session endpoints
//!
//! Availability and sessions are addressed by instructor email, with
//! positional indices into the current lists.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{BookingError, BookingResult, Day, InstructorId, TimeWindow};
use crate::domains::instructors::activities;
use crate::domains::instructors::{
    Availability, InstructorData, InstructorSession, NewSession, RegisterInstructorInput,
    UpdateProfileInput,
};
use crate::server::app::AppState;

use super::parse_id;

#[derive(Deserialize)]
pub struct ListQuery {
    city: Option<String>,
    location: Option<String>,
}

/// Body of the per-day insert: one window, or several under `slots`
#[derive(Deserialize)]
#[serde(untagged)]
pub enum WindowsBody {
    Many { slots: Vec<TimeWindow> },
    One(TimeWindow),
}

/// Sessions may be posted one at a time or as a list
#[derive(Deserialize)]
#[serde(untagged)]
pub enum SessionsBody {
    Many(Vec<NewSession>),
    One(NewSession),
}

#[derive(Serialize)]
pub struct MessageResponse {
    message: String,
}

fn parse_day(raw: &str) -> BookingResult<Day> {
    Ok(raw.parse::<Day>()?)
}

/// `-1` or `abc` is reported like an index past the end
fn parse_index(raw: &str, missing: BookingError) -> BookingResult<usize> {
    raw.trim().parse::<usize>().map_err(|_| missing)
}

/// POST /instructors
pub async fn register_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<RegisterInstructorInput>, JsonRejection>,
) -> BookingResult<(StatusCode, Json<InstructorData>)> {
    let Json(input) = payload?;
    let instructor = activities::register_instructor(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(instructor)))
}

/// GET /instructors?city=..&location=..
pub async fn list_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListQuery>,
) -> BookingResult<Json<Vec<InstructorData>>> {
    let instructors = activities::list_instructors(
        query.city.as_deref(),
        query.location.as_deref(),
        &state.deps,
    )
    .await?;
    Ok(Json(instructors))
}

/// DELETE /instructors/:id
pub async fn delete_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> BookingResult<Json<MessageResponse>> {
    let id: InstructorId = parse_id(&id, "instructor id")?;
    activities::delete_instructor(id, &state.deps).await?;
    Ok(Json(MessageResponse {
        message: "Instructor deleted successfully".to_string(),
    }))
}

/// GET /instructors/profile/:email
pub async fn get_profile_handler(
    Extension(state): Extension<AppState>,
    Path(email): Path<String>,
) -> BookingResult<Json<InstructorData>> {
    Ok(Json(activities::get_profile(&email, &state.deps).await?))
}

/// PUT /instructors/profile/:email
pub async fn update_profile_handler(
    Extension(state): Extension<AppState>,
    Path(email): Path<String>,
    payload: Result<Json<UpdateProfileInput>, JsonRejection>,
) -> BookingResult<Json<InstructorData>> {
    let Json(input) = payload?;
    Ok(Json(activities::update_profile(&email, input, &state.deps).await?))
}

/// GET /instructors/availability/:email
pub async fn get_availability_handler(
    Extension(state): Extension<AppState>,
    Path(email): Path<String>,
) -> BookingResult<Json<Availability>> {
    Ok(Json(activities::get_availability(&email, &state.deps).await?))
}

/// PUT /instructors/availability/:email
pub async fn replace_availability_handler(
    Extension(state): Extension<AppState>,
    Path(email): Path<String>,
    payload: Result<Json<Availability>, JsonRejection>,
) -> BookingResult<Json<InstructorData>> {
    let Json(availability) = payload?;
    Ok(Json(
        activities::replace_availability(&email, availability, &state.deps).await?,
    ))
}

/// POST /instructors/availability/:email/:day
pub async fn add_windows_handler(
    Extension(state): Extension<AppState>,
    Path((email, day)): Path<(String, String)>,
    payload: Result<Json<WindowsBody>, JsonRejection>,
) -> BookingResult<Json<InstructorData>> {
    let day = parse_day(&day)?;
    let windows = match payload? {
        Json(WindowsBody::Many { slots }) => slots,
        Json(WindowsBody::One(window)) => vec![window],
    };
    Ok(Json(
        activities::add_windows(&email, day, windows, &state.deps).await?,
    ))
}

/// PUT /instructors/availability/:email/:day/:slot_idx
pub async fn edit_window_handler(
    Extension(state): Extension<AppState>,
    Path((email, day, slot_idx)): Path<(String, String, String)>,
    payload: Result<Json<TimeWindow>, JsonRejection>,
) -> BookingResult<Json<InstructorData>> {
    let day = parse_day(&day)?;
    let index = parse_index(&slot_idx, BookingError::SlotNotFound)?;
    let Json(window) = payload?;
    Ok(Json(
        activities::edit_window(&email, day, index, window, &state.deps).await?,
    ))
}

/// DELETE /instructors/availability/:email/:day/:slot_idx
pub async fn delete_window_handler(
    Extension(state): Extension<AppState>,
    Path((email, day, slot_idx)): Path<(String, String, String)>,
) -> BookingResult<Json<InstructorData>> {
    let day = parse_day(&day)?;
    let index = parse_index(&slot_idx, BookingError::SlotNotFound)?;
    Ok(Json(
        activities::delete_window(&email, day, index, &state.deps).await?,
    ))
}

/// POST /instructors/sessions/:email
pub async fn add_sessions_handler(
    Extension(state): Extension<AppState>,
    Path(email): Path<String>,
    payload: Result<Json<SessionsBody>, JsonRejection>,
) -> BookingResult<Json<Vec<InstructorSession>>> {
    let sessions = match payload? {
        Json(SessionsBody::Many(sessions)) => sessions,
        Json(SessionsBody::One(session)) => vec![session],
    };
    Ok(Json(
        activities::add_sessions(&email, sessions, &state.deps).await?,
    ))
}

/// GET /instructors/sessions/:email
pub async fn list_sessions_handler(
    Extension(state): Extension<AppState>,
    Path(email): Path<String>,
) -> BookingResult<Json<Vec<InstructorSession>>> {
    Ok(Json(activities::list_sessions(&email, &state.deps).await?))
}

/// DELETE /instructors/sessions/:email/:idx
pub async fn delete_session_handler(
    Extension(state): Extension<AppState>,
    Path((email, idx)): Path<(String, String)>,
) -> BookingResult<Json<Vec<InstructorSession>>> {
    let index = parse_index(&idx, BookingError::NotFound("Session"))?;
    Ok(Json(
        activities::delete_session(&email, index, &state.deps).await?,
    ))
}
