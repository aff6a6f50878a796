//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{bookings, health_handler, instructors, users};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

impl AppState {
    pub fn new(deps: ServerDeps) -> Self {
        Self {
            db_pool: deps.db_pool.clone(),
            deps: Arc::new(deps),
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // No configured origins means any origin (development)
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Router {
    let app_state = AppState::new(deps);

    Router::new()
        .route("/health", get(health_handler))
        .route("/users", post(users::create_user_handler))
        // Bookings
        .route(
            "/bookings",
            post(bookings::create_booking_handler).get(bookings::list_notified_handler),
        )
        .route(
            "/bookings/assigned/:instructor_id",
            get(bookings::list_assigned_handler),
        )
        .route("/bookings/user/:user_id", get(bookings::list_for_user_handler))
        .route("/bookings/:id/status", get(bookings::booking_status_handler))
        .route("/bookings/:id/accept", post(bookings::accept_booking_handler))
        .route("/bookings/:id", delete(bookings::delete_booking_handler))
        // Instructors
        .route(
            "/instructors",
            post(instructors::register_handler).get(instructors::list_handler),
        )
        .route("/instructors/:id", delete(instructors::delete_handler))
        .route(
            "/instructors/profile/:email",
            get(instructors::get_profile_handler).put(instructors::update_profile_handler),
        )
        // Availability
        .route(
            "/instructors/availability/:email",
            get(instructors::get_availability_handler)
                .put(instructors::replace_availability_handler),
        )
        .route(
            "/instructors/availability/:email/:day",
            post(instructors::add_windows_handler),
        )
        .route(
            "/instructors/availability/:email/:day/:slot_idx",
            put(instructors::edit_window_handler).delete(instructors::delete_window_handler),
        )
        // Sessions
        .route(
            "/instructors/sessions/:email",
            post(instructors::add_sessions_handler).get(instructors::list_sessions_handler),
        )
        .route(
            "/instructors/sessions/:email/:idx",
            delete(instructors::delete_session_handler),
        )
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors_layer(allowed_origins))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}
