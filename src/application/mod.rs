//! Application layer services implementing the rewrite engine.
//!
//! Services consume the domain's repository and policy traits plus the cache
//! abstraction, and expose a session-scoped API to HTTP handlers and the admin
//! CLI.
//!
//! # Available Services
//!
//! - [`services::domain_resolver::DomainResolver`] - Local host resolution with caching
//! - [`services::rewrite_service::RewriteService`] - Asset URL rewriting onto the static host
//! - [`services::cache_buster::CacheBuster`] - Optional `m=<mtime>` query parameter

pub mod services;
