//! HTTP server initialization and runtime setup.
//!
//! Handles cache and database connections, assembly of the rewrite service from
//! configuration, and the Axum server lifecycle.

use crate::application::services::{CacheBuster, DomainResolver, RewriteService, Topology};
use crate::config::{Config, Tenancy};
use crate::domain::policies::{HostListLocality, PatternVeto};
use crate::infrastructure::cache::{CacheService, MemoryCache, RedisCache};
use crate::infrastructure::persistence::PgTenantDirectory;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis cache (or in-process MemoryCache fallback)
/// - PostgreSQL pool and tenant directory (multi-tenant only)
/// - Rewrite service and its policies
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let service = build_rewrite_service(&config).await?;
    let state = AppState::new(Arc::new(service));

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the rewrite service described by `config`.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a configured value
/// cannot be turned into a policy.
pub async fn build_rewrite_service(config: &Config) -> Result<RewriteService> {
    let cache = connect_cache(config).await;

    let topology = match config.tenancy {
        Tenancy::Single => {
            let (home_host, site_host) = config.single_tenant_hosts()?;
            Topology::SingleTenant {
                home_host,
                site_host,
            }
        }
        Tenancy::Multi => {
            let database_url = config
                .database_url
                .as_deref()
                .context("TENANCY=multi requires a database")?;
            let pool = connect_database(database_url, config).await?;
            tracing::info!("Connected to database");

            Topology::MultiTenant {
                directory: Arc::new(PgTenantDirectory::new(
                    Arc::new(pool),
                    config.directory_tables(),
                )),
                domain_mapping: config.domain_mapping,
            }
        }
    };

    let mut resolver =
        DomainResolver::new(topology, cache.clone()).with_cache_life(config.cache_life_seconds);

    let locality = HostListLocality::new(
        config.local_hosts.clone(),
        config.foreign_hosts.clone(),
    );
    if !locality.is_empty() {
        resolver = resolver.with_locality(Arc::new(locality));
    }

    let mut builder = RewriteService::builder(resolver)
        .static_host(config.static_host.clone())
        .cdn_served_domains(config.cdn_served_domains.clone())
        .secondary_tenant_id(config.secondary_tenant_id)
        .dns_prefetch_hosts(config.dns_prefetch_hosts.clone());

    if !config.rewrite_exclude_patterns.is_empty() {
        let veto = PatternVeto::new(&config.rewrite_exclude_patterns)
            .context("Invalid REWRITE_EXCLUDE_PATTERNS")?;
        builder = builder.veto(Arc::new(veto));
    }

    if let Some(root) = &config.cache_buster_root {
        tracing::info!("Cache buster enabled (root: {})", root.display());
        builder = builder.cache_buster(Some(CacheBuster::new(root.clone(), cache)));
    }

    Ok(builder.build())
}

/// Connects to Redis, falling back to an in-process cache.
pub async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using MemoryCache.", e);
            }
        }
    } else {
        tracing::info!("Cache in process memory (MemoryCache)");
    }

    Arc::new(MemoryCache::new())
}

/// Opens the PostgreSQL pool used by the tenant directory.
pub async fn connect_database(database_url: &str, config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
