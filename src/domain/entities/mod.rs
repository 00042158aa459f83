//! Core entities of the rewrite engine.
//!
//! # Entity Types
//!
//! - [`DomainSet`] - Hostnames considered local, mapped to their tenant id
//! - [`TenantHost`] - A single `(host, tenant_id)` directory row
//! - [`RewriteContext`] - The emission point that asked for a rewrite
//! - [`RequestInfo`] - Facts about the execution context (tenant, scheme)
//! - [`StaticHost`] - The validated static hostname

pub mod domain_set;
pub mod request_info;
pub mod rewrite_context;
pub mod static_host;
pub mod tenant_host;

pub use domain_set::{DomainMap, DomainSet};
pub use request_info::{RequestInfo, Scheme};
pub use rewrite_context::RewriteContext;
pub use static_host::StaticHost;
pub use tenant_host::TenantHost;
