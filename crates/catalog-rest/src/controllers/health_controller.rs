//! Health check controller.

use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tracing::error;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status: `ok` when every dependency responds, else `degraded`.
    pub status: String,
    /// Per-dependency check results.
    pub checks: HealthChecks,
    /// Application version.
    pub version: String,
    /// Check timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Per-dependency health flags.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    pub database: bool,
    pub cache: bool,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check endpoint.
///
/// Probes the database with a trivial query and the cache with a set/get
/// pulse. Failures degrade the status rather than erroring the endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Dependency health report", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match state.db_pool.health_check().await {
        Ok(()) => true,
        Err(e) => {
            error!("Database health check failed: {}", e);
            false
        }
    };

    let cache = check_cache(&state).await;

    let status = if database && cache { "ok" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        checks: HealthChecks { database, cache },
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

async fn check_cache(state: &AppState) -> bool {
    const PULSE_KEY: &str = "catalog:cache:health:pulse";

    // A disabled cache is deliberate, not unhealthy.
    if !state.cache.is_enabled() {
        return true;
    }

    let write = state
        .cache
        .set_raw(PULSE_KEY, "ok", Duration::from_secs(5))
        .await;
    if let Err(e) = write {
        error!("Cache health check failed: {}", e);
        return false;
    }

    match state.cache.get_raw(PULSE_KEY).await {
        Ok(Some(value)) => value == "ok",
        Ok(None) => false,
        Err(e) => {
            error!("Cache health check failed: {}", e);
            false
        }
    }
}
