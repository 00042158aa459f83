//! Domain set resolution with a shared TTL cache and a per-context memo.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{DomainMap, DomainSet, TenantHost};
use crate::domain::policies::{DefaultLocality, LocalityOverridePolicy};
use crate::domain::repositories::{DirectoryError, TenantDirectory};
use crate::error::RewriteError;
use crate::infrastructure::cache::CacheService;

/// Cache key for the network-wide tenant host map.
pub const NETWORK_DOMAINS_KEY: &str = "network_domains";
/// Cache key for the custom domain mapping map.
pub const MAPPED_DOMAINS_KEY: &str = "mapped_domains";
/// Default lifetime of cached domain maps.
pub const DEFAULT_CACHE_LIFE_SECONDS: u64 = 1800;

/// Tenant id of the only tenant in a single-tenant deployment.
const SINGLE_TENANT_ID: i64 = 1;

/// How the deployment is laid out.
#[derive(Clone)]
pub enum Topology {
    /// One site. Its hosts are known from configuration; nothing is looked up.
    SingleTenant { home_host: String, site_host: String },
    /// A network of tenants listed by a directory, optionally with custom
    /// domain mappings.
    MultiTenant {
        directory: Arc<dyn TenantDirectory>,
        domain_mapping: bool,
    },
}

#[derive(Debug, Clone, Copy)]
enum DomainKind {
    Network,
    Mapped,
}

impl DomainKind {
    fn cache_key(self) -> &'static str {
        match self {
            Self::Network => NETWORK_DOMAINS_KEY,
            Self::Mapped => MAPPED_DOMAINS_KEY,
        }
    }

    async fn fetch(self, directory: &dyn TenantDirectory) -> Result<Vec<TenantHost>, DirectoryError> {
        match self {
            Self::Network => directory.list_all_tenant_hosts().await,
            Self::Mapped => directory.list_mapped_hosts().await,
        }
    }
}

/// Resolves which hostnames are local to the deployment.
///
/// Shared by every execution context. Per-context memoization lives in the
/// [`ResolverSession`] returned by [`DomainResolver::session`]; the cache
/// injected here is the only state shared between contexts.
pub struct DomainResolver {
    topology: Topology,
    cache: Arc<dyn CacheService>,
    cache_life: u64,
    locality: Arc<dyn LocalityOverridePolicy>,
}

impl DomainResolver {
    pub fn new(topology: Topology, cache: Arc<dyn CacheService>) -> Self {
        Self {
            topology,
            cache,
            cache_life: DEFAULT_CACHE_LIFE_SECONDS,
            locality: Arc::new(DefaultLocality),
        }
    }

    pub fn with_cache_life(mut self, seconds: u64) -> Self {
        self.cache_life = seconds;
        self
    }

    pub fn with_locality(mut self, policy: Arc<dyn LocalityOverridePolicy>) -> Self {
        self.locality = policy;
        self
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn cache(&self) -> &Arc<dyn CacheService> {
        &self.cache
    }

    /// Starts a fresh execution context with an empty memo.
    pub fn session(&self) -> ResolverSession<'_> {
        ResolverSession {
            resolver: self,
            network: None,
            mapped: None,
            merged: None,
        }
    }

    /// Reports whether the tenant directory answers. Single-tenant
    /// deployments have none and are always healthy.
    pub async fn health_check(&self) -> bool {
        match &self.topology {
            Topology::SingleTenant { .. } => true,
            Topology::MultiTenant { directory, .. } => directory.health_check().await,
        }
    }

    async fn load(&self, kind: DomainKind, directory: &dyn TenantDirectory) -> DomainMap {
        let key = kind.cache_key();

        if let Some(domains) = self.read_cache(key).await {
            return domains;
        }

        let domains = match kind.fetch(directory).await {
            Ok(rows) if rows.is_empty() => {
                warn!(key, "Directory returned no rows, caching empty domain map");
                DomainMap::new()
            }
            Ok(rows) => DomainSet::map_from_rows(rows),
            Err(e) => {
                let err = RewriteError::DirectoryQueryFailed(e.to_string());
                warn!(key, error = %err, "Treating domain map as empty");
                DomainMap::new()
            }
        };

        self.write_cache(key, &domains).await;
        domains
    }

    async fn read_cache(&self, key: &str) -> Option<DomainMap> {
        let raw = match self.cache.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, "Cache read failed: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<DomainMap>(&raw) {
            Ok(domains) => {
                debug!(key, count = domains.len(), "Domain map served from cache");
                Some(domains)
            }
            Err(e) => {
                warn!(key, "Ignoring undecodable cached domain map: {}", e);
                None
            }
        }
    }

    async fn write_cache(&self, key: &str, domains: &DomainMap) {
        let raw = match serde_json::to_string(domains) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, "Failed to encode domain map: {}", e);
                return;
            }
        };

        if let Err(e) = self.cache.set(key, &raw, self.cache_life).await {
            warn!(key, "Cache write failed: {}", e);
        }
    }
}

/// Domain resolution for one execution context.
///
/// Memoizes every map it resolves for its own lifetime. Create one per
/// request and drop it afterwards; never share it between requests, since
/// tenant context may differ.
pub struct ResolverSession<'r> {
    resolver: &'r DomainResolver,
    network: Option<DomainMap>,
    mapped: Option<DomainMap>,
    merged: Option<DomainSet>,
}

impl ResolverSession<'_> {
    /// Hosts of every tenant in the deployment.
    ///
    /// Single-tenant deployments answer from configuration. Multi-tenant ones
    /// read the memo, then the shared cache, then the directory.
    pub async fn resolve_network_domains(&mut self) -> DomainMap {
        if let Some(domains) = &self.network {
            return domains.clone();
        }

        let domains = match &self.resolver.topology {
            Topology::SingleTenant {
                home_host,
                site_host,
            } => DomainSet::map_from_rows([
                TenantHost::new(home_host.clone(), SINGLE_TENANT_ID),
                TenantHost::new(site_host.clone(), SINGLE_TENANT_ID),
            ]),
            Topology::MultiTenant { directory, .. } => {
                self.resolver
                    .load(DomainKind::Network, directory.as_ref())
                    .await
            }
        };

        self.network = Some(domains.clone());
        domains
    }

    /// Custom domains mapped onto tenants.
    ///
    /// Empty unless the deployment is multi-tenant with domain mapping enabled.
    pub async fn resolve_mapped_domains(&mut self) -> DomainMap {
        if let Some(domains) = &self.mapped {
            return domains.clone();
        }

        let domains = match &self.resolver.topology {
            Topology::MultiTenant {
                directory,
                domain_mapping: true,
            } => {
                self.resolver
                    .load(DomainKind::Mapped, directory.as_ref())
                    .await
            }
            _ => DomainMap::new(),
        };

        self.mapped = Some(domains.clone());
        domains
    }

    /// All local hosts, mapped domains taking precedence over network ones.
    pub async fn resolve_domains(&mut self) -> DomainSet {
        if let Some(set) = &self.merged {
            return set.clone();
        }

        let network = self.resolve_network_domains().await;
        let mapped = self.resolve_mapped_domains().await;
        let set = DomainSet::merge(network, mapped);

        self.merged = Some(set.clone());
        set
    }

    /// Whether `host` belongs to the deployment, after the locality policy.
    pub async fn is_local(&mut self, host: &str) -> bool {
        if self.merged.is_none() {
            self.resolve_domains().await;
        }

        let in_set = self
            .merged
            .as_ref()
            .is_some_and(|set| set.contains(host));

        self.resolver.locality.is_local(host, in_set)
    }
}
