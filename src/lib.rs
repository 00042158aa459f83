//! # Static Host Rewriter
//!
//! Rewrites asset URLs emitted by a content-management system onto a separate
//! static host for CDN offload, with tenant-aware resolution of which hosts
//! count as local.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the tenant directory trait and policy traits
//! - **Application Layer** ([`application`]) - Domain resolution, rewriting and cache busting
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL directory, Redis and in-process caches
//! - **API Layer** ([`api`]) - HTTP sidecar handlers, DTOs and middleware
//!
//! ## Features
//!
//! - Context-aware rewriting (plugin extension allow-list, dynamic resource exclusion)
//! - Single- and multi-tenant topologies with custom domain mapping
//! - Shared TTL cache for domain maps, memoized per request
//! - Pluggable policies for the static host, locality and rewrite vetoes
//! - Optional `m=<mtime>` cache busting
//!
//! ## Quick Start
//!
//! ```bash
//! export STATIC_HOST="s.example.com"
//! export HOME_URL="https://example.com/"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Library Use
//!
//! ```rust,ignore
//! let service = RewriteService::builder(resolver)
//!     .static_host(Some("s.example.com".to_string()))
//!     .build();
//!
//! let mut session = service.session(RequestInfo::default());
//! let url = session
//!     .rewrite("https://example.com/style.css", RewriteContext::EnqueuedStyle)
//!     .await;
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, RewriteError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        CacheBuster, Decision, DomainResolver, RewriteService, RewriteSession, SkipReason,
        Topology,
    };
    pub use crate::domain::entities::{
        DomainSet, RequestInfo, RewriteContext, Scheme, StaticHost, TenantHost,
    };
    pub use crate::domain::repositories::TenantDirectory;
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache};
    pub use crate::infrastructure::persistence::StaticTenantDirectory;
    pub use crate::state::AppState;
}
