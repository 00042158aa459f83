//! Handler for the resolved domain set.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::domains::{DomainItem, DomainListResponse, DomainsParams};
use crate::domain::entities::RequestInfo;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the hosts currently considered local, sorted by name.
///
/// # Endpoint
///
/// `GET /api/domains?tenant_id=2`
///
/// Reads through the same cache as rewriting, so the answer reflects what
/// rewrites see until the cached maps expire.
pub async fn domain_list_handler(
    State(state): State<AppState>,
    Query(params): Query<DomainsParams>,
) -> Result<Json<DomainListResponse>, AppError> {
    let domains = state
        .rewrite_service
        .session(RequestInfo::default())
        .resolve_domains()
        .await;

    let items: Vec<DomainItem> = domains
        .sorted()
        .into_iter()
        .filter(|row| params.tenant_id.is_none_or(|id| row.tenant_id == id))
        .map(DomainItem::from)
        .collect();

    Ok(Json(DomainListResponse {
        total: items.len(),
        items,
    }))
}
