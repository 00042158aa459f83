//! DTOs for the rewrite endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::SkipReason;
use crate::domain::entities::Scheme;
use crate::error::ErrorInfo;

/// Request to rewrite one or more asset URLs for the same page view.
///
/// All items share one resolver session, so the domain set is resolved at
/// most once per batch.
#[derive(Debug, Deserialize, Validate)]
pub struct RewriteRequest {
    /// Tenant serving the page (defaults to the primary tenant).
    pub tenant_id: Option<i64>,

    /// Scheme of the page request; falls back to proxy headers.
    pub scheme: Option<Scheme>,

    #[validate(length(min = 1, max = 1000), nested)]
    pub items: Vec<RewriteItem>,
}

/// Individual URL and the emission point it came from.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RewriteItem {
    #[validate(length(min = 1, max = 8192))]
    pub url: String,

    /// Rewrite context in `snake_case` or `kebab-case`.
    pub context: String,
}

/// Response containing batch results in request order.
#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub summary: RewriteSummary,
    pub items: Vec<RewriteResultItem>,
}

/// Individual result for a URL in the batch.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RewriteResultItem {
    Success {
        url: String,
        rewritten: String,
        changed: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<SkipReason>,
    },
    Error {
        url: String,
        error: ErrorInfo,
    },
}

#[derive(Debug, Default, Serialize)]
pub struct RewriteSummary {
    pub total: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub failed: usize,
}
