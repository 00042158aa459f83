//! The set of hostnames that belong to this deployment.

use std::collections::HashMap;

use super::TenantHost;
use crate::utils::asset_url::normalize_host;

/// Raw `host -> tenant_id` mapping as cached and as returned by the directory.
pub type DomainMap = HashMap<String, i64>;

/// Hostnames considered local to the deployment, each mapped to the tenant
/// that owns it.
///
/// Built from up to three sources: the tenant's own canonical hosts, the
/// network peers of a multi-tenant install, and custom domain mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSet {
    domains: DomainMap,
}

impl DomainSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from directory rows. Hosts are normalized the way URL
    /// hosts are (lowercase, punycode); a host listed twice keeps the tenant
    /// id of its last row.
    pub fn map_from_rows<I>(rows: I) -> DomainMap
    where
        I: IntoIterator<Item = TenantHost>,
    {
        rows.into_iter()
            .map(|row| (normalize_host(&row.host), row.tenant_id))
            .collect()
    }

    /// Merges mapped domains over network domains.
    ///
    /// On a host collision the mapped entry wins.
    pub fn merge(network: DomainMap, mapped: DomainMap) -> Self {
        let mut domains = network;
        domains.extend(mapped);
        Self { domains }
    }

    pub fn contains(&self, host: &str) -> bool {
        self.domains.contains_key(host)
    }

    pub fn tenant_of(&self, host: &str) -> Option<i64> {
        self.domains.get(host).copied()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Entries ordered by hostname, for stable listings.
    pub fn sorted(&self) -> Vec<TenantHost> {
        let mut rows: Vec<TenantHost> = self
            .domains
            .iter()
            .map(|(host, tenant_id)| TenantHost::new(host.clone(), *tenant_id))
            .collect();
        rows.sort_by(|a, b| a.host.cmp(&b.host));
        rows
    }
}

impl From<DomainMap> for DomainSet {
    fn from(domains: DomainMap) -> Self {
        Self { domains }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, i64)]) -> DomainMap {
        entries
            .iter()
            .map(|(host, id)| (host.to_string(), *id))
            .collect()
    }

    #[test]
    fn test_mapped_wins_on_collision() {
        let set = DomainSet::merge(map(&[("a.com", 1), ("b.com", 1)]), map(&[("a.com", 2)]));

        assert_eq!(set.tenant_of("a.com"), Some(2));
        assert_eq!(set.tenant_of("b.com"), Some(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_last_row_wins_per_host() {
        let rows = vec![
            TenantHost::new("a.com".to_string(), 1),
            TenantHost::new("b.com".to_string(), 2),
            TenantHost::new("a.com".to_string(), 3),
        ];

        let domains = DomainSet::map_from_rows(rows);

        assert_eq!(domains.get("a.com"), Some(&3));
        assert_eq!(domains.len(), 2);
    }

    #[test]
    fn test_rows_use_url_host_form() {
        let rows = vec![
            TenantHost::new("Bücher.de".to_string(), 1),
            TenantHost::new("WWW.Example.com".to_string(), 2),
        ];

        let domains = DomainSet::map_from_rows(rows);

        assert_eq!(domains.get("xn--bcher-kva.de"), Some(&1));
        assert_eq!(domains.get("www.example.com"), Some(&2));
    }

    #[test]
    fn test_membership() {
        let set = DomainSet::from(map(&[("example.com", 1)]));

        assert!(set.contains("example.com"));
        assert!(!set.contains("other.org"));
        assert!(!set.is_empty());
        assert!(DomainSet::new().is_empty());
    }

    #[test]
    fn test_sorted_listing() {
        let set = DomainSet::from(map(&[("z.com", 1), ("a.com", 2), ("m.com", 3)]));

        let hosts: Vec<String> = set.sorted().into_iter().map(|r| r.host).collect();

        assert_eq!(hosts, vec!["a.com", "m.com", "z.com"]);
    }
}
