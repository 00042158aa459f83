//! Infrastructure layer for external integrations.
//!
//! Implements the collaborator interfaces the engine consumes.
//!
//! # Modules
//!
//! - [`cache`] - TTL cache backends (Redis, in-process, no-op)
//! - [`persistence`] - Tenant directory implementations

pub mod cache;
pub mod persistence;
