//! Repository trait for the multi-tenant directory.

use crate::domain::entities::TenantHost;
use async_trait::async_trait;

/// Errors raised while listing tenant hosts.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Directory query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

/// Source of raw hostname records for a multi-tenant deployment.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTenantDirectory`] - PostgreSQL tables
/// - [`crate::infrastructure::persistence::StaticTenantDirectory`] - Fixed in-memory rows
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Lists the canonical host of every tenant in the network.
    ///
    /// Hosts are not guaranteed to be unique.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the backing store cannot be queried.
    async fn list_all_tenant_hosts(&self) -> Result<Vec<TenantHost>, DirectoryError>;

    /// Lists custom domains mapped onto tenants.
    ///
    /// Only consulted when domain mapping is enabled for the deployment.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the backing store cannot be queried.
    async fn list_mapped_hosts(&self) -> Result<Vec<TenantHost>, DirectoryError>;

    /// Checks whether the directory backend is reachable.
    async fn health_check(&self) -> bool;
}
