//! Handlers for upload and concatenation base URLs.

use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use serde_json::json;

use crate::api::dto::assets::{ConcatBaseParams, UploadUrlParams, UrlResponse};
use crate::domain::entities::{RequestInfo, Scheme, request_info::DEFAULT_TENANT_ID};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::forwarded::scheme_from_headers;

fn not_configured() -> AppError {
    AppError::not_configured("Static host is not configured", json!({}))
}

/// Returns the uploads base URL on the static host.
///
/// # Endpoint
///
/// `GET /api/upload-url?tenant_id=2`
///
/// # Errors
///
/// Returns 404 `not_configured` when rewriting is disabled; the caller keeps
/// its own uploads URL.
pub async fn upload_url_handler(
    State(state): State<AppState>,
    Query(params): Query<UploadUrlParams>,
) -> Result<Json<UrlResponse>, AppError> {
    let request = RequestInfo::new(
        params.tenant_id.unwrap_or(DEFAULT_TENANT_ID),
        Scheme::default(),
    );

    let url = state
        .rewrite_service
        .session(request)
        .upload_url()
        .ok_or_else(not_configured)?;

    Ok(Json(UrlResponse { url }))
}

/// Returns the origin used as base for concatenated asset URLs.
///
/// # Endpoint
///
/// `GET /api/concat-base?scheme=http`
///
/// Without `scheme` the request's `X-Forwarded-Proto` / `Forwarded` headers
/// decide, defaulting to HTTPS.
///
/// # Errors
///
/// Returns 404 `not_configured` when rewriting is disabled.
pub async fn concat_base_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ConcatBaseParams>,
) -> Result<Json<UrlResponse>, AppError> {
    let scheme = params
        .scheme
        .unwrap_or_else(|| scheme_from_headers(&headers));

    let url = state
        .rewrite_service
        .session(RequestInfo::new(DEFAULT_TENANT_ID, scheme))
        .concat_base_url()
        .ok_or_else(not_configured)?;

    Ok(Json(UrlResponse { url }))
}

/// Renders dns-prefetch hints for the page head.
///
/// # Endpoint
///
/// `GET /api/dns-prefetch`
///
/// Responds with `text/html`, one `<link>` tag per line (empty when no hosts
/// are configured).
pub async fn dns_prefetch_handler(
    State(state): State<AppState>,
) -> axum::response::Html<String> {
    let mut body = state.rewrite_service.dns_prefetch_links().join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    axum::response::Html(body)
}
