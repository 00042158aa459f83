#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use static_host_rewriter::application::services::{DomainResolver, RewriteService, Topology};
use static_host_rewriter::domain::entities::TenantHost;
use static_host_rewriter::domain::repositories::{DirectoryError, TenantDirectory};
use static_host_rewriter::infrastructure::cache::{CacheService, MemoryCache};
use static_host_rewriter::infrastructure::persistence::StaticTenantDirectory;
use static_host_rewriter::routes::router;
use static_host_rewriter::state::AppState;
use std::sync::Arc;

pub const STATIC_HOST: &str = "static.example.com";

/// Network of three tenants plus one custom domain mapped onto tenant 2.
pub fn network_directory() -> StaticTenantDirectory {
    StaticTenantDirectory::from_pairs(
        &[
            ("example.com", 1),
            ("cdn.example.com", 1),
            ("blog.example.com", 2),
            ("shop.example.com", 3),
        ],
        &[("myblog.org", 2)],
    )
}

/// Directory whose database is gone.
pub struct UnreachableDirectory;

#[async_trait]
impl TenantDirectory for UnreachableDirectory {
    async fn list_all_tenant_hosts(&self) -> Result<Vec<TenantHost>, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".to_string()))
    }

    async fn list_mapped_hosts(&self) -> Result<Vec<TenantHost>, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn multi_tenant(directory: Arc<dyn TenantDirectory>) -> DomainResolver {
    let cache: Arc<dyn CacheService> = Arc::new(MemoryCache::new());
    DomainResolver::new(
        Topology::MultiTenant {
            directory,
            domain_mapping: true,
        },
        cache,
    )
}

pub fn single_tenant() -> DomainResolver {
    let cache: Arc<dyn CacheService> = Arc::new(MemoryCache::new());
    DomainResolver::new(
        Topology::SingleTenant {
            home_host: "example.com".to_string(),
            site_host: "cdn.example.com".to_string(),
        },
        cache,
    )
}

pub fn create_test_state(service: RewriteService) -> AppState {
    AppState::new(Arc::new(service))
}

pub fn server_for(service: RewriteService) -> TestServer {
    TestServer::new(router(create_test_state(service))).unwrap()
}

/// Multi-tenant server with domain mapping and the default static host.
pub fn default_server() -> TestServer {
    server_for(
        RewriteService::builder(multi_tenant(Arc::new(network_directory())))
            .static_host(Some(STATIC_HOST.to_string()))
            .dns_prefetch_hosts(vec!["stats.example.com".to_string()])
            .build(),
    )
}

/// Server with rewriting disabled.
pub fn unconfigured_server() -> TestServer {
    server_for(RewriteService::builder(single_tenant()).build())
}
