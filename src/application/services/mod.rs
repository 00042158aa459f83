//! Business logic services for the application layer.

pub mod cache_buster;
pub mod domain_resolver;
pub mod rewrite_service;

pub use cache_buster::CacheBuster;
pub use domain_resolver::{DomainResolver, ResolverSession, Topology};
pub use rewrite_service::{Decision, RewriteService, RewriteSession, SkipReason};
