//! Handler for the batch rewrite endpoint.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::rewrite::{
    RewriteItem, RewriteRequest, RewriteResponse, RewriteResultItem, RewriteSummary,
};
use crate::application::services::{Decision, RewriteSession};
use crate::domain::entities::{RequestInfo, RewriteContext, request_info::DEFAULT_TENANT_ID};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::forwarded::scheme_from_headers;

/// Rewrites asset URLs emitted while rendering one page.
///
/// # Endpoint
///
/// `POST /api/rewrite`
///
/// # Request Body
///
/// ```json
/// {
///   "tenant_id": 2,
///   "scheme": "https",
///   "items": [
///     { "url": "https://example.com/style.css", "context": "enqueued_style" }
///   ]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "summary": { "total": 1, "changed": 1, "unchanged": 0, "failed": 0 },
///   "items": [
///     {
///       "url": "https://example.com/style.css",
///       "rewritten": "https://s.example.com/style.css",
///       "changed": true
///     }
///   ]
/// }
/// ```
///
/// Unchanged items carry a `reason`. An item with an unknown context gets an
/// `error` entry; the rest of the batch is still processed.
///
/// # Errors
///
/// Returns 400 Bad Request if the batch is empty, too large, or has an empty URL.
pub async fn rewrite_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RewriteRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    payload.validate()?;

    let request = RequestInfo::new(
        payload.tenant_id.unwrap_or(DEFAULT_TENANT_ID),
        payload
            .scheme
            .unwrap_or_else(|| scheme_from_headers(&headers)),
    );
    let mut session = state.rewrite_service.session(request);

    let mut summary = RewriteSummary {
        total: payload.items.len(),
        ..Default::default()
    };
    let mut items = Vec::with_capacity(summary.total);

    for item in payload.items {
        let url = item.url.clone();

        match process_single_item(&mut session, item).await {
            Ok(Decision::Rewritten(rewritten)) => {
                summary.changed += 1;
                items.push(RewriteResultItem::Success {
                    url,
                    rewritten,
                    changed: true,
                    reason: None,
                });
            }
            Ok(Decision::Unchanged(reason)) => {
                summary.unchanged += 1;
                items.push(RewriteResultItem::Success {
                    rewritten: url.clone(),
                    url,
                    changed: false,
                    reason: Some(reason),
                });
            }
            Err(err) => {
                summary.failed += 1;
                items.push(RewriteResultItem::Error {
                    url,
                    error: err.to_error_info(),
                });
            }
        }
    }

    Ok(Json(RewriteResponse { summary, items }))
}

async fn process_single_item(
    session: &mut RewriteSession<'_>,
    item: RewriteItem,
) -> Result<Decision, AppError> {
    let context: RewriteContext = item.context.parse().map_err(|e: String| {
        AppError::bad_request(
            e,
            serde_json::json!({ "allowed": RewriteContext::ALL.map(|c| c.as_str()) }),
        )
    })?;

    Ok(session.decide_for(&item.url, context).await)
}
