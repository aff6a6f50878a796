//! User endpoints

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::common::BookingResult;
use crate::domains::users::activities::register_user;
use crate::domains::users::User;
use crate::server::app::AppState;

#[derive(Deserialize)]
pub struct CreateUserBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

/// POST /users
pub async fn create_user_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<CreateUserBody>, JsonRejection>,
) -> BookingResult<(StatusCode, Json<User>)> {
    let Json(body) = payload?;
    let user = register_user(&body.name, &body.email, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
