//! The hostname static assets are served from.

use std::fmt;
use url::Host;

/// A bare hostname (optionally with a port) that eligible assets move to.
///
/// Set once at startup and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHost(String);

impl StaticHost {
    /// Validates a configured static host.
    ///
    /// Accepts `host` or `host:port`, with surrounding whitespace and a
    /// trailing slash tolerated. The host is stored the way URL hosts are
    /// reported: lowercase, punycode for internationalized names.
    ///
    /// # Errors
    ///
    /// Returns a message if the value is empty, carries a scheme, a path or
    /// whitespace, has a non-numeric port, or is not a valid hostname.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let value = raw.trim().trim_end_matches('/');

        if value.is_empty() {
            return Err("static host must not be empty".to_string());
        }
        if value.contains("://") {
            return Err(format!("static host '{}' must not include a scheme", raw));
        }
        if value.contains('/') || value.chars().any(char::is_whitespace) {
            return Err(format!("static host '{}' must be a bare hostname", raw));
        }

        let (host, port) = split_port(value)
            .ok_or_else(|| format!("static host '{}' must be a bare hostname", raw))?;
        if let Some(port) = port
            && port.parse::<u16>().is_err()
        {
            return Err(format!("static host '{}' has an invalid port", raw));
        }

        let host = Host::parse(host)
            .map_err(|e| format!("static host '{}' is not a valid hostname: {}", raw, e))?
            .to_string();
        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '[' | ']' | ':');
        if !host.chars().all(allowed) {
            return Err(format!("static host '{}' is not a valid hostname", raw));
        }

        Ok(match port {
            Some(port) => Self(format!("{}:{}", host, port)),
            None => Self(host),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hostname without any port.
    pub fn hostname(&self) -> &str {
        if self.0.starts_with('[') {
            return self.0.split_inclusive(']').next().unwrap_or(&self.0);
        }
        self.0.split(':').next().unwrap_or(&self.0)
    }
}

/// Splits `host[:port]`, keeping IPv6 literals intact. `None` when anything
/// other than a port follows the host.
fn split_port(value: &str) -> Option<(&str, Option<&str>)> {
    let host_end = if value.starts_with('[') {
        value.find(']').map_or(value.len(), |end| end + 1)
    } else {
        value.find(':').unwrap_or(value.len())
    };

    let (host, rest) = value.split_at(host_end);
    if rest.is_empty() {
        return Some((host, None));
    }
    rest.strip_prefix(':').map(|port| (host, Some(port)))
}

impl fmt::Display for StaticHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_host() {
        assert_eq!(StaticHost::parse("s.example.com").unwrap().as_str(), "s.example.com");
    }

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(StaticHost::parse(" S.Example.com/ ").unwrap().as_str(), "s.example.com");
        assert_eq!(StaticHost::parse("cdn.local:8080").unwrap().as_str(), "cdn.local:8080");
    }

    #[test]
    fn test_hostname_strips_port() {
        assert_eq!(StaticHost::parse("cdn.local:8080").unwrap().hostname(), "cdn.local");
        assert_eq!(StaticHost::parse("s.example.com").unwrap().hostname(), "s.example.com");
    }

    #[test]
    fn test_parse_rejects() {
        assert!(StaticHost::parse("").is_err());
        assert!(StaticHost::parse("   ").is_err());
        assert!(StaticHost::parse("https://s.example.com").is_err());
        assert!(StaticHost::parse("s.example.com/assets").is_err());
        assert!(StaticHost::parse("s example.com").is_err());
        assert!(StaticHost::parse("cdn.local:http").is_err());
        assert!(StaticHost::parse("[::1]x").is_err());
        assert!(StaticHost::parse("a'><script>.com").is_err());
        assert!(StaticHost::parse("a\"b.com").is_err());
    }

    #[test]
    fn test_parse_idn_and_ipv6() {
        assert_eq!(StaticHost::parse("Bücher.de").unwrap().as_str(), "xn--bcher-kva.de");

        let v6 = StaticHost::parse("[::1]:8080").unwrap();
        assert_eq!(v6.as_str(), "[::1]:8080");
        assert_eq!(v6.hostname(), "[::1]");
    }
}
