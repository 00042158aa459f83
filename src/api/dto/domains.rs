//! DTOs for the resolved domain set.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::TenantHost;

/// Query parameters for `GET /api/domains`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct DomainsParams {
    /// Only list hosts of this tenant.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub tenant_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct DomainItem {
    pub host: String,
    pub tenant_id: i64,
}

impl From<TenantHost> for DomainItem {
    fn from(row: TenantHost) -> Self {
        Self {
            host: row.host,
            tenant_id: row.tenant_id,
        }
    }
}

/// Local hosts sorted by name.
#[derive(Debug, Serialize)]
pub struct DomainListResponse {
    pub total: usize,
    pub items: Vec<DomainItem>,
}
