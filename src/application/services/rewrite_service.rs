//! Static host rewriting for asset URLs.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::application::services::cache_buster::CacheBuster;
use crate::application::services::domain_resolver::{DomainResolver, ResolverSession};
use crate::domain::entities::{DomainSet, RequestInfo, RewriteContext, StaticHost};
use crate::domain::policies::{AllowAll, DefaultStaticHost, RewriteVetoPolicy, StaticHostPolicy};
use crate::error::RewriteError;
use crate::utils::asset_url::{AssetUrl, AssetUrlError, registrable_domain, url_extension};

/// Extensions starting with this marker are server-executed and never move.
pub const DYNAMIC_EXTENSION_PREFIX: &str = "php";
/// Registrable domains whose assets are already served from a CDN.
pub const DEFAULT_CDN_SERVED_DOMAINS: &[&str] = &["wordpress.com", "wp.com"];
/// Tenant whose uploads live under `/sites/{id}`.
pub const DEFAULT_SECONDARY_TENANT_ID: i64 = 2;
/// Path of the uploads directory on the static host.
pub const UPLOADS_PATH: &str = "/wp-content/uploads";

/// Why a URL was left as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotInitialized,
    DynamicResource,
    ExtensionNotAllowed,
    Relative,
    Malformed,
    AlreadyStatic,
    NotLocal,
    Vetoed,
    CdnServed,
}

/// Outcome of a rewrite decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Rewritten(String),
    Unchanged(SkipReason),
}

impl Decision {
    /// The URL to emit: the rewritten one, or `original` when skipped.
    pub fn into_url(self, original: &str) -> String {
        match self {
            Self::Rewritten(url) => url,
            Self::Unchanged(_) => original.to_string(),
        }
    }
}

/// Moves eligible asset URLs onto the static host.
///
/// Built once at startup. Owns the static host, the policies and the domain
/// resolver; every execution context borrows it through
/// [`RewriteService::session`].
pub struct RewriteService {
    static_host: Option<StaticHost>,
    resolver: DomainResolver,
    veto: Arc<dyn RewriteVetoPolicy>,
    cdn_served_domains: Vec<String>,
    secondary_tenant_id: i64,
    cache_buster: Option<CacheBuster>,
    dns_prefetch_hosts: Vec<String>,
}

impl RewriteService {
    pub fn builder(resolver: DomainResolver) -> RewriteServiceBuilder {
        RewriteServiceBuilder::new(resolver)
    }

    /// The static host, or `None` when rewriting is disabled.
    pub fn static_host(&self) -> Option<&StaticHost> {
        self.static_host.as_ref()
    }

    pub fn resolver(&self) -> &DomainResolver {
        &self.resolver
    }

    pub fn cache_buster_enabled(&self) -> bool {
        self.cache_buster.is_some()
    }

    /// Starts an execution context for one request.
    pub fn session(&self, request: RequestInfo) -> RewriteSession<'_> {
        RewriteSession {
            service: self,
            domains: self.resolver.session(),
            request,
        }
    }

    /// `<link rel='dns-prefetch'>` tags for the configured hosts.
    pub fn dns_prefetch_links(&self) -> Vec<String> {
        self.dns_prefetch_hosts
            .iter()
            .map(|host| format!("<link rel='dns-prefetch' href='//{}'>", host))
            .collect()
    }
}

/// Assembles a [`RewriteService`] with its policies.
pub struct RewriteServiceBuilder {
    resolver: DomainResolver,
    static_host: Option<String>,
    static_host_policy: Arc<dyn StaticHostPolicy>,
    veto: Arc<dyn RewriteVetoPolicy>,
    cdn_served_domains: Vec<String>,
    secondary_tenant_id: i64,
    cache_buster: Option<CacheBuster>,
    dns_prefetch_hosts: Vec<String>,
}

impl RewriteServiceBuilder {
    fn new(resolver: DomainResolver) -> Self {
        Self {
            resolver,
            static_host: None,
            static_host_policy: Arc::new(DefaultStaticHost),
            veto: Arc::new(AllowAll),
            cdn_served_domains: DEFAULT_CDN_SERVED_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            secondary_tenant_id: DEFAULT_SECONDARY_TENANT_ID,
            cache_buster: None,
            dns_prefetch_hosts: Vec::new(),
        }
    }

    pub fn static_host(mut self, host: Option<String>) -> Self {
        self.static_host = host;
        self
    }

    pub fn static_host_policy(mut self, policy: Arc<dyn StaticHostPolicy>) -> Self {
        self.static_host_policy = policy;
        self
    }

    pub fn veto(mut self, policy: Arc<dyn RewriteVetoPolicy>) -> Self {
        self.veto = policy;
        self
    }

    pub fn cdn_served_domains(mut self, domains: Vec<String>) -> Self {
        self.cdn_served_domains = domains
            .into_iter()
            .map(|d| d.trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        self
    }

    pub fn secondary_tenant_id(mut self, tenant_id: i64) -> Self {
        self.secondary_tenant_id = tenant_id;
        self
    }

    pub fn cache_buster(mut self, buster: Option<CacheBuster>) -> Self {
        self.cache_buster = buster;
        self
    }

    /// Hosts to emit DNS prefetch hints for. Values that are not bare
    /// hostnames are dropped.
    pub fn dns_prefetch_hosts(mut self, hosts: Vec<String>) -> Self {
        self.dns_prefetch_hosts = hosts
            .iter()
            .filter_map(|raw| match StaticHost::parse(raw) {
                Ok(host) => Some(host.to_string()),
                Err(e) => {
                    warn!("Skipping DNS prefetch host: {}", e);
                    None
                }
            })
            .collect();
        self
    }

    /// Applies the static host policy and freezes the configuration.
    ///
    /// A host the policy rejects or that fails validation leaves the service
    /// uninitialized rather than failing startup.
    pub fn build(self) -> RewriteService {
        let static_host = self
            .static_host_policy
            .static_host(self.static_host)
            .and_then(|raw| match StaticHost::parse(&raw) {
                Ok(host) => Some(host),
                Err(e) => {
                    warn!("Rewriting disabled: {}", e);
                    None
                }
            });

        if static_host.is_none() {
            warn!("{}; asset URLs will pass through", RewriteError::NotInitialized);
        }

        RewriteService {
            static_host,
            resolver: self.resolver,
            veto: self.veto,
            cdn_served_domains: self.cdn_served_domains,
            secondary_tenant_id: self.secondary_tenant_id,
            cache_buster: self.cache_buster,
            dns_prefetch_hosts: self.dns_prefetch_hosts,
        }
    }
}

/// Rewriting within one execution context.
///
/// Carries the request facts and the resolver memo; drop it when the request
/// ends.
pub struct RewriteSession<'s> {
    service: &'s RewriteService,
    domains: ResolverSession<'s>,
    request: RequestInfo,
}

impl RewriteSession<'_> {
    /// Rewrites `url` for `context`, returning it unchanged when any check
    /// declines.
    pub async fn rewrite(&mut self, url: &str, context: RewriteContext) -> String {
        self.decide(url, context).await.into_url(url)
    }

    /// Same checks as [`Self::rewrite`], reporting why a URL was skipped.
    pub async fn decide(&mut self, url: &str, context: RewriteContext) -> Decision {
        let Some(static_host) = self.service.static_host.as_ref() else {
            debug!(url, error = %RewriteError::NotInitialized, "Skipping rewrite");
            return Decision::Unchanged(SkipReason::NotInitialized);
        };

        let extension = url_extension(url);
        if extension.starts_with(DYNAMIC_EXTENSION_PREFIX) {
            return Decision::Unchanged(SkipReason::DynamicResource);
        }

        if let Some(allowed) = context.allowed_extensions()
            && !allowed.contains(&extension)
        {
            return Decision::Unchanged(SkipReason::ExtensionNotAllowed);
        }

        let asset = match AssetUrl::parse(url) {
            Ok(asset) => asset,
            Err(AssetUrlError::Relative) => return Decision::Unchanged(SkipReason::Relative),
            Err(AssetUrlError::Malformed(reason)) => {
                debug!(url, error = %RewriteError::MalformedUrl(reason), "Skipping rewrite");
                return Decision::Unchanged(SkipReason::Malformed);
            }
        };
        let host = asset.host();

        if host == static_host.hostname() {
            return Decision::Unchanged(SkipReason::AlreadyStatic);
        }

        if !self.domains.is_local(host).await {
            return Decision::Unchanged(SkipReason::NotLocal);
        }

        if !self.service.veto.allow(host, url, context) {
            debug!(url, %context, "Rewrite vetoed by policy");
            return Decision::Unchanged(SkipReason::Vetoed);
        }

        let mut rewritten = asset.with_host(static_host.as_str());
        if let Some(buster) = &self.service.cache_buster {
            rewritten = buster.apply(&rewritten).await;
        }

        debug!(from = url, to = %rewritten, %context, "Rewrote asset URL");
        Decision::Rewritten(rewritten)
    }

    /// Rewrites a third-party static URL unless its registrable domain is
    /// already CDN-served.
    pub async fn rewrite_third_party_static(&mut self, url: &str) -> String {
        self.decide_third_party_static(url).await.into_url(url)
    }

    pub async fn decide_third_party_static(&mut self, url: &str) -> Decision {
        if let Ok(asset) = AssetUrl::parse(url) {
            let domain = registrable_domain(asset.host());
            if self.service.cdn_served_domains.iter().any(|d| d == domain) {
                return Decision::Unchanged(SkipReason::CdnServed);
            }
        }

        self.decide(url, RewriteContext::ThirdPartyStatic).await
    }

    /// Dispatches on context.
    ///
    /// Third-party URLs get the CDN allow-list check. Upload and concat
    /// contexts ignore `url` and synthesize their base URL; everything else
    /// goes through [`Self::decide`].
    pub async fn decide_for(&mut self, url: &str, context: RewriteContext) -> Decision {
        let synthesized = match context {
            RewriteContext::ThirdPartyStatic => return self.decide_third_party_static(url).await,
            RewriteContext::UploadPath => self.upload_url(),
            RewriteContext::ConcatBase => self.concat_base_url(),
            _ => return self.decide(url, context).await,
        };

        match synthesized {
            Some(base) => Decision::Rewritten(base),
            None => Decision::Unchanged(SkipReason::NotInitialized),
        }
    }

    /// Base URL of the uploads directory on the static host.
    ///
    /// `None` when rewriting is disabled; callers keep their own default.
    pub fn upload_url(&self) -> Option<String> {
        let static_host = self.service.static_host.as_ref()?;
        let mut url = format!("https://{}{}", static_host, UPLOADS_PATH);

        if self.request.tenant_id == self.service.secondary_tenant_id {
            url.push_str(&format!("/sites/{}", self.request.tenant_id));
        }

        Some(url)
    }

    /// Origin used as the base of concatenated asset URLs, in the request's
    /// scheme.
    pub fn concat_base_url(&self) -> Option<String> {
        let static_host = self.service.static_host.as_ref()?;
        Some(format!("{}://{}", self.request.scheme, static_host))
    }

    pub async fn resolve_domains(&mut self) -> DomainSet {
        self.domains.resolve_domains().await
    }

    pub async fn is_local(&mut self, host: &str) -> bool {
        self.domains.is_local(host).await
    }
}
