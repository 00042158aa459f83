//! Directory serving a fixed set of rows.

use async_trait::async_trait;

use crate::domain::entities::TenantHost;
use crate::domain::repositories::{DirectoryError, TenantDirectory};

/// In-memory tenant directory.
///
/// Handy for embedding the engine where hosts are known up front, and for
/// integration tests that should not need a database.
#[derive(Debug, Clone, Default)]
pub struct StaticTenantDirectory {
    tenants: Vec<TenantHost>,
    mappings: Vec<TenantHost>,
}

impl StaticTenantDirectory {
    pub fn new(tenants: Vec<TenantHost>, mappings: Vec<TenantHost>) -> Self {
        Self { tenants, mappings }
    }

    /// Builds rows from `(host, tenant_id)` pairs.
    pub fn from_pairs(tenants: &[(&str, i64)], mappings: &[(&str, i64)]) -> Self {
        let rows = |pairs: &[(&str, i64)]| {
            pairs
                .iter()
                .map(|(host, id)| TenantHost::new(host.to_string(), *id))
                .collect()
        };
        Self::new(rows(tenants), rows(mappings))
    }
}

#[async_trait]
impl TenantDirectory for StaticTenantDirectory {
    async fn list_all_tenant_hosts(&self) -> Result<Vec<TenantHost>, DirectoryError> {
        Ok(self.tenants.clone())
    }

    async fn list_mapped_hosts(&self) -> Result<Vec<TenantHost>, DirectoryError> {
        Ok(self.mappings.clone())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
