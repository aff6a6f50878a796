use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use std::time::Duration;

use crate::server::app::AppState;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: DatabaseHealth,
    pool: PoolHealth,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolHealth {
    size: u32,
    idle: usize,
    max_connections: u32,
}

async fn probe_database(state: &AppState) -> DatabaseHealth {
    match tokio::time::timeout(PROBE_TIMEOUT, sqlx::query("SELECT 1").execute(&state.db_pool)).await {
        Ok(Ok(_)) => DatabaseHealth {
            status: "ok",
            error: None,
        },
        Ok(Err(e)) => DatabaseHealth {
            status: "error",
            error: Some(format!("Query failed: {}", e)),
        },
        Err(_) => DatabaseHealth {
            status: "error",
            error: Some(format!("Query timeout (>{}s)", PROBE_TIMEOUT.as_secs())),
        },
    }
}

/// GET /health
///
/// 200 while the store answers, 503 otherwise. Booking state lives entirely
/// in Postgres, so the database is the only dependency probed.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = probe_database(&state).await;

    let pool = PoolHealth {
        size: state.db_pool.size(),
        idle: state.db_pool.num_idle(),
        max_connections: state.db_pool.options().get_max_connections(),
    };

    let (status, code) = if database.error.is_none() {
        ("healthy", StatusCode::OK)
    } else {
        tracing::warn!(error = ?database.error, "Health check failed");
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            pool,
        }),
    )
}
