//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::application::services::Topology;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: Directory or cache unreachable
///
/// # Components Checked
///
/// 1. **Rewriter**: Reports the static host (informational; a disabled
///    rewriter is a valid configuration)
/// 2. **Directory**: `SELECT 1` against the tenant directory (multi-tenant only)
/// 3. **Cache**: Redis PING, or the in-process cache
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "rewriter": { "status": "ok", "message": "Static host: s.example.com" },
///     "directory": { "status": "ok", "message": "Single tenant, no directory" },
///     "cache": { "status": "ok", "message": "memory backend" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let rewriter = check_rewriter(&state);

    let directory = check_directory(&state).await;

    let cache = check_cache(&state).await;

    let all_healthy = directory.is_ok() && cache.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            rewriter,
            directory,
            cache,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn check_rewriter(state: &AppState) -> CheckStatus {
    match state.rewrite_service.static_host() {
        Some(host) => CheckStatus::ok(format!("Static host: {}", host)),
        None => CheckStatus::ok("Rewriting disabled, URLs pass through"),
    }
}

async fn check_directory(state: &AppState) -> CheckStatus {
    let resolver = state.rewrite_service.resolver();

    match resolver.topology() {
        Topology::SingleTenant { .. } => CheckStatus::ok("Single tenant, no directory"),
        Topology::MultiTenant { .. } => {
            if resolver.health_check().await {
                CheckStatus::ok("Directory reachable")
            } else {
                CheckStatus::error("Directory query failed")
            }
        }
    }
}

/// Checks cache connectivity via PING command.
async fn check_cache(state: &AppState) -> CheckStatus {
    let cache = state.cache();

    if cache.health_check().await {
        CheckStatus::ok(format!("{} backend", cache.backend()))
    } else {
        CheckStatus::error(format!("{} backend unreachable", cache.backend()))
    }
}
