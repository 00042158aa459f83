//! Facts about the execution context a rewrite runs in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tenant assumed when the caller does not name one.
pub const DEFAULT_TENANT_ID: i64 = 1;

/// URL scheme of the request being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    #[default]
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(format!("unsupported scheme '{}'", other)),
        }
    }
}

/// Per-request input to a rewrite session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestInfo {
    pub tenant_id: i64,
    pub scheme: Scheme,
}

impl RequestInfo {
    pub fn new(tenant_id: i64, scheme: Scheme) -> Self {
        Self { tenant_id, scheme }
    }
}

impl Default for RequestInfo {
    fn default() -> Self {
        Self::new(DEFAULT_TENANT_ID, Scheme::Https)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_parse() {
        assert_eq!("http".parse::<Scheme>().unwrap(), Scheme::Http);
        assert_eq!("HTTPS".parse::<Scheme>().unwrap(), Scheme::Https);
        assert!("ftp".parse::<Scheme>().is_err());
    }

    #[test]
    fn test_default_request() {
        let request = RequestInfo::default();

        assert_eq!(request.tenant_id, 1);
        assert_eq!(request.scheme, Scheme::Https);
    }
}
