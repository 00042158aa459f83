//! Repository trait definitions for the domain layer.
//!
//! # Available Repositories
//!
//! - [`TenantDirectory`] - Hostname listings for every tenant and every custom
//!   domain mapping
//!
//! Implementations live in `crate::infrastructure::persistence`; a mock is
//! generated via `mockall` for unit tests.

pub mod tenant_directory;

pub use tenant_directory::{DirectoryError, TenantDirectory};

#[cfg(test)]
pub use tenant_directory::MockTenantDirectory;
