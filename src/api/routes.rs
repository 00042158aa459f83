//! API route configuration.

use crate::api::handlers::{
    concat_base_handler, dns_prefetch_handler, domain_list_handler, rewrite_handler,
    upload_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST /rewrite`       - Rewrite a batch of asset URLs
/// - `GET  /upload-url`    - Uploads base URL on the static host
/// - `GET  /concat-base`   - Base origin for concatenated assets
/// - `GET  /domains`       - Resolved local domain set
/// - `GET  /dns-prefetch`  - dns-prefetch link tags
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rewrite", post(rewrite_handler))
        .route("/upload-url", get(upload_url_handler))
        .route("/concat-base", get(concat_base_handler))
        .route("/domains", get(domain_list_handler))
        .route("/dns-prefetch", get(dns_prefetch_handler))
}
