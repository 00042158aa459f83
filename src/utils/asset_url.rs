//! Asset URL inspection and host substitution.
//!
//! Parsing goes through the `url` crate, but substitution works on the original
//! string so that everything except the host (scheme, userinfo, path, query,
//! fragment) comes back byte-for-byte. The port survives unless the new host
//! brings its own.

use std::borrow::Cow;
use std::ops::Range;
use url::{Host, Url};

/// Reasons a URL carries no rewritable host.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssetUrlError {
    #[error("URL has no host component")]
    Relative,

    #[error("Invalid URL format: {0}")]
    Malformed(String),
}

/// An absolute (or protocol-relative) URL with its host located in the raw text.
#[derive(Debug, Clone)]
pub struct AssetUrl<'a> {
    raw: &'a str,
    host: String,
    host_span: Range<usize>,
    authority_end: usize,
    path: String,
}

impl<'a> AssetUrl<'a> {
    /// Parses `raw` and locates its host.
    ///
    /// Protocol-relative references (`//host/path`) are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AssetUrlError::Relative`] for references without an authority
    /// (`/wp-content/x.css`, `mailto:`, `data:`), and
    /// [`AssetUrlError::Malformed`] when the authority cannot be parsed.
    pub fn parse(raw: &'a str) -> Result<Self, AssetUrlError> {
        let authority_start = authority_start(raw).ok_or(AssetUrlError::Relative)?;

        let candidate: Cow<'_, str> = if raw.starts_with("//") {
            Cow::Owned(format!("https:{}", raw))
        } else {
            Cow::Borrowed(raw)
        };

        let parsed =
            Url::parse(&candidate).map_err(|e| AssetUrlError::Malformed(e.to_string()))?;

        let host = match parsed.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(AssetUrlError::Relative),
        };

        let rest = &raw[authority_start..];
        let authority_len = rest.find(['/', '?', '#', '\\']).unwrap_or(rest.len());
        let authority = &rest[..authority_len];

        let host_offset = authority.rfind('@').map_or(0, |at| at + 1);
        let host_part = &authority[host_offset..];
        let host_len = if host_part.starts_with('[') {
            host_part.find(']').map_or(host_part.len(), |end| end + 1)
        } else {
            host_part.find(':').unwrap_or(host_part.len())
        };

        if host_len == 0 {
            return Err(AssetUrlError::Malformed("empty host".to_string()));
        }

        let start = authority_start + host_offset;

        Ok(Self {
            raw,
            host,
            host_span: start..start + host_len,
            authority_end: authority_start + authority_len,
            path: parsed.path().to_string(),
        })
    }

    /// Normalized (lowercase, punycode) host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Percent-encoded path, `/` when the URL has none.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the original URL with its host replaced by `new_host`.
    ///
    /// When `new_host` carries a port it replaces the original port too.
    pub fn with_host(&self, new_host: &str) -> String {
        let end = if has_port(new_host) {
            self.authority_end
        } else {
            self.host_span.end
        };

        let mut out = String::with_capacity(self.raw.len() + new_host.len());
        out.push_str(&self.raw[..self.host_span.start]);
        out.push_str(new_host);
        out.push_str(&self.raw[end..]);
        out
    }
}

/// Canonical form of a configured or stored hostname, matching what
/// [`AssetUrl::host`] reports: lowercase, IDNA to punycode, IPv4 normalized.
///
/// Values the URL parser rejects are only trimmed and lowercased.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    match Host::parse(host) {
        Ok(parsed) => parsed.to_string(),
        Err(_) => host.to_ascii_lowercase(),
    }
}

/// Whether `host` ends in `:port` (IPv6 literals are bracketed).
fn has_port(host: &str) -> bool {
    let after_literal = match host.rfind(']') {
        Some(end) => &host[end + 1..],
        None => host,
    };
    after_literal.contains(':')
}

/// Byte offset where the authority begins, if the reference has one.
fn authority_start(raw: &str) -> Option<usize> {
    if raw.starts_with("//") {
        return Some(2);
    }

    let sep = raw.find("://")?;
    let scheme = &raw[..sep];
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    valid.then_some(sep + 3)
}

/// Extension of the last path segment, without the dot. Case is preserved.
///
/// Returns `""` when the segment has no dot.
pub fn path_extension(path: &str) -> &str {
    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment.rfind('.') {
        Some(dot) => &segment[dot + 1..],
        None => "",
    }
}

/// Best-effort extension for any reference, absolute or relative.
pub fn url_extension(raw: &str) -> &str {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let without_query = &raw[..end];
    let path = match authority_start(without_query) {
        Some(start) => {
            let rest = &without_query[start..];
            rest.find('/').map_or("", |slash| &rest[slash..])
        }
        None => without_query,
    };
    path_extension(path)
}

/// Second-level domain plus top-level domain (`a.b.example.com` → `example.com`).
///
/// Single-label hosts come back unchanged.
pub fn registrable_domain(host: &str) -> &str {
    let host = host.trim_end_matches('.');
    let mut dots = host.rmatch_indices('.');
    match (dots.next(), dots.next()) {
        (Some(_), Some((second, _))) => &host[second + 1..],
        _ => host,
    }
}

/// Adds `key=value` to the query string, replacing an existing `key`.
///
/// The fragment, if any, stays at the end.
pub fn set_query_param(url: &str, key: &str, value: &str) -> String {
    let (base, fragment) = match url.find('#') {
        Some(hash) => (&url[..hash], &url[hash..]),
        None => (url, ""),
    };
    let (path, query) = match base.find('?') {
        Some(q) => (&base[..q], &base[q + 1..]),
        None => (base, ""),
    };

    let mut pairs: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some(key))
        .collect();
    let new_pair = format!("{}={}", key, value);
    pairs.push(&new_pair);

    format!("{}?{}{}", path, pairs.join("&"), fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute() {
        let url = AssetUrl::parse("https://Example.com/wp-content/style.css?ver=6.4").unwrap();

        assert_eq!(url.host(), "example.com");
        assert_eq!(url.path(), "/wp-content/style.css");
    }

    #[test]
    fn test_parse_relative_has_no_host() {
        assert_eq!(
            AssetUrl::parse("/wp-content/style.css").unwrap_err(),
            AssetUrlError::Relative
        );
        assert_eq!(AssetUrl::parse("style.css").unwrap_err(), AssetUrlError::Relative);
        assert_eq!(
            AssetUrl::parse("/redirect?to=https://a.com/x.js").unwrap_err(),
            AssetUrlError::Relative
        );
        assert_eq!(
            AssetUrl::parse("data:image/png;base64,AAAA").unwrap_err(),
            AssetUrlError::Relative
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            AssetUrl::parse("https://exa mple.com/x.js"),
            Err(AssetUrlError::Malformed(_))
        ));
    }

    #[test]
    fn test_protocol_relative() {
        let url = AssetUrl::parse("//example.com/app.js").unwrap();

        assert_eq!(url.host(), "example.com");
        assert_eq!(url.with_host("s.example.com"), "//s.example.com/app.js");
    }

    #[test]
    fn test_with_host_preserves_everything_else() {
        let url = AssetUrl::parse("http://user:pw@example.com:8080/a/b.js?v=1#frag").unwrap();

        assert_eq!(
            url.with_host("static.example.com"),
            "http://user:pw@static.example.com:8080/a/b.js?v=1#frag"
        );
    }

    #[test]
    fn test_with_host_only_touches_authority() {
        let url = AssetUrl::parse("https://example.com/example.com/logo.png").unwrap();

        assert_eq!(
            url.with_host("s.example.com"),
            "https://s.example.com/example.com/logo.png"
        );
    }

    #[test]
    fn test_with_host_bare_origin() {
        let url = AssetUrl::parse("https://example.com").unwrap();

        assert_eq!(url.with_host("s.example.com"), "https://s.example.com");
    }

    #[test]
    fn test_ipv6_host() {
        let url = AssetUrl::parse("http://[::1]:3000/x.css").unwrap();

        assert_eq!(url.host(), "[::1]");
        assert_eq!(url.with_host("s.example.com"), "http://s.example.com:3000/x.css");
    }

    #[test]
    fn test_with_host_port_replaces_original_port() {
        let url = AssetUrl::parse("https://user@example.com:8443/a.js?v=1").unwrap();
        let rewritten = url.with_host("cdn.local:8080");

        assert_eq!(rewritten, "https://user@cdn.local:8080/a.js?v=1");
        assert!(Url::parse(&rewritten).is_ok());
    }

    #[test]
    fn test_with_host_port_on_url_without_port() {
        let url = AssetUrl::parse("//example.com/a.js").unwrap();

        assert_eq!(url.with_host("cdn.local:8080"), "//cdn.local:8080/a.js");
        assert_eq!(
            AssetUrl::parse("http://[::1]:3000/x.css").unwrap().with_host("[::2]:81"),
            "http://[::2]:81/x.css"
        );
    }

    #[test]
    fn test_normalize_host_matches_parsed_host() {
        let url = AssetUrl::parse("https://BÜCHER.de/style.css").unwrap();

        assert_eq!(normalize_host("bücher.de"), url.host());
        assert_eq!(normalize_host(" Example.COM "), "example.com");
        assert_eq!(normalize_host("[::1]"), "[::1]");
        assert_eq!(normalize_host("not a host"), "not a host");
    }

    #[test]
    fn test_path_extension() {
        assert_eq!(path_extension("/a/b/style.min.css"), "css");
        assert_eq!(path_extension("/a/b/LOGO.JPG"), "JPG");
        assert_eq!(path_extension("/a.dir/readme"), "");
        assert_eq!(path_extension("/"), "");
        assert_eq!(path_extension("/wp-admin/admin-ajax.php"), "php");
    }

    #[test]
    fn test_url_extension() {
        assert_eq!(url_extension("https://a.com/x/app.js?ver=1.2"), "js");
        assert_eq!(url_extension("/wp-login.php#top"), "php");
        assert_eq!(url_extension("https://a.com"), "");
        assert_eq!(url_extension("//a.com/img.gif"), "gif");
    }

    #[test]
    fn test_registrable_domain() {
        assert_eq!(registrable_domain("s0.wp.com"), "wp.com");
        assert_eq!(registrable_domain("a.b.wordpress.com"), "wordpress.com");
        assert_eq!(registrable_domain("example.com"), "example.com");
        assert_eq!(registrable_domain("localhost"), "localhost");
    }

    #[test]
    fn test_set_query_param() {
        assert_eq!(
            set_query_param("https://a.com/x.css", "m", "100"),
            "https://a.com/x.css?m=100"
        );
        assert_eq!(
            set_query_param("https://a.com/x.css?ver=2#top", "m", "100"),
            "https://a.com/x.css?ver=2&m=100#top"
        );
        assert_eq!(
            set_query_param("https://a.com/x.css?m=1&ver=2", "m", "100"),
            "https://a.com/x.css?ver=2&m=100"
        );
    }
}
