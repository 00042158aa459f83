//! Extension points a deployment plugs into the rewrite engine.
//!
//! Each policy is a typed strategy object injected when the
//! [`crate::application::services::RewriteService`] is built. The `Default*`
//! implementations leave every decision untouched.

use regex::RegexSet;
use std::collections::HashSet;

use crate::domain::entities::RewriteContext;
use crate::utils::asset_url::normalize_host;

/// Decides the final static host before the engine first uses it.
pub trait StaticHostPolicy: Send + Sync {
    /// Receives the configured host (if any) and returns the host to use.
    /// Returning `None` leaves the engine uninitialized, so every URL passes
    /// through untouched.
    fn static_host(&self, configured: Option<String>) -> Option<String>;
}

/// Overrides the "is this host ours" answer for individual hosts.
pub trait LocalityOverridePolicy: Send + Sync {
    fn is_local(&self, host: &str, in_domain_set: bool) -> bool;
}

/// Last word on a rewrite that passed every other check.
pub trait RewriteVetoPolicy: Send + Sync {
    /// Returns `false` to keep `url` on its original host.
    fn allow(&self, host: &str, url: &str, context: RewriteContext) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStaticHost;

impl StaticHostPolicy for DefaultStaticHost {
    fn static_host(&self, configured: Option<String>) -> Option<String> {
        configured
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLocality;

impl LocalityOverridePolicy for DefaultLocality {
    fn is_local(&self, _host: &str, in_domain_set: bool) -> bool {
        in_domain_set
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl RewriteVetoPolicy for AllowAll {
    fn allow(&self, _host: &str, _url: &str, _context: RewriteContext) -> bool {
        true
    }
}

/// Forces hosts in or out of the local set regardless of the directory.
///
/// A host listed in both sets is treated as foreign.
#[derive(Debug, Clone, Default)]
pub struct HostListLocality {
    local: HashSet<String>,
    foreign: HashSet<String>,
}

impl HostListLocality {
    pub fn new<L, F>(local: L, foreign: F) -> Self
    where
        L: IntoIterator<Item = String>,
        F: IntoIterator<Item = String>,
    {
        Self {
            local: local.into_iter().map(|h| normalize_host(&h)).collect(),
            foreign: foreign.into_iter().map(|h| normalize_host(&h)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.foreign.is_empty()
    }
}

impl LocalityOverridePolicy for HostListLocality {
    fn is_local(&self, host: &str, in_domain_set: bool) -> bool {
        let host = normalize_host(host);
        if self.foreign.contains(&host) {
            return false;
        }
        in_domain_set || self.local.contains(&host)
    }
}

/// Vetoes rewrites of URLs matching any of a set of regular expressions.
#[derive(Debug, Clone)]
pub struct PatternVeto {
    patterns: RegexSet,
}

impl PatternVeto {
    /// # Errors
    ///
    /// Returns the regex error for the first pattern that does not compile.
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            patterns: RegexSet::new(patterns)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl RewriteVetoPolicy for PatternVeto {
    fn allow(&self, _host: &str, url: &str, _context: RewriteContext) -> bool {
        !self.patterns.is_match(url)
    }
}
