//! PostgreSQL implementation of the tenant directory.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::TenantHost;
use crate::domain::repositories::{DirectoryError, TenantDirectory};

/// Table names holding tenant hosts and custom domain mappings.
///
/// Both tables expose a `domain` text column and a `blog_id` integer column.
/// Names are validated as plain SQL identifiers when configuration loads.
#[derive(Debug, Clone)]
pub struct DirectoryTables {
    pub tenants: String,
    pub mappings: String,
}

impl Default for DirectoryTables {
    fn default() -> Self {
        Self {
            tenants: "wp_blogs".to_string(),
            mappings: "wp_domain_mapping".to_string(),
        }
    }
}

/// PostgreSQL-backed directory of tenant hostnames.
///
/// Table names are configurable, so queries are built at runtime instead of
/// through the compile-time checked macros.
pub struct PgTenantDirectory {
    pool: Arc<PgPool>,
    tenants_query: String,
    mappings_query: String,
}

impl PgTenantDirectory {
    /// Creates a new directory over a database connection pool.
    pub fn new(pool: Arc<PgPool>, tables: DirectoryTables) -> Self {
        Self {
            pool,
            tenants_query: format!(
                "SELECT domain, blog_id::bigint FROM {} ORDER BY blog_id",
                tables.tenants
            ),
            mappings_query: format!(
                "SELECT domain, blog_id::bigint FROM {} ORDER BY blog_id",
                tables.mappings
            ),
        }
    }

    async fn fetch(&self, query: &str) -> Result<Vec<TenantHost>, DirectoryError> {
        let rows = sqlx::query_as::<_, (String, i64)>(query)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(host, tenant_id)| TenantHost::new(host, tenant_id))
            .collect())
    }
}

#[async_trait]
impl TenantDirectory for PgTenantDirectory {
    async fn list_all_tenant_hosts(&self) -> Result<Vec<TenantHost>, DirectoryError> {
        self.fetch(&self.tenants_query).await
    }

    async fn list_mapped_hosts(&self) -> Result<Vec<TenantHost>, DirectoryError> {
        self.fetch(&self.mappings_query).await
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
