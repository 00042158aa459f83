//! Tenant directory implementations.
//!
//! # Directories
//!
//! - [`PgTenantDirectory`] - Reads tenant and domain-mapping tables over SQLx
//! - [`StaticTenantDirectory`] - Serves a fixed list of rows from memory

pub mod pg_tenant_directory;
pub mod static_tenant_directory;

pub use pg_tenant_directory::{DirectoryTables, PgTenantDirectory};
pub use static_tenant_directory::StaticTenantDirectory;
