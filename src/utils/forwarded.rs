//! Request scheme detection from proxy headers.

use axum::http::{HeaderMap, header};

use crate::domain::entities::Scheme;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Determines the scheme the client used to reach the site.
///
/// Checks, in order:
/// - `X-Forwarded-Proto` (first value of a comma-separated list)
/// - `Forwarded` (`proto=` parameter of the first element)
///
/// Falls back to HTTPS when neither header is present or parseable.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-proto", "http".parse().unwrap());
///
/// assert_eq!(scheme_from_headers(&headers), Scheme::Http);
/// ```
pub fn scheme_from_headers(headers: &HeaderMap) -> Scheme {
    if let Some(scheme) = headers
        .get(X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.parse().ok())
    {
        return scheme;
    }

    headers
        .get(header::FORWARDED)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|element| {
            element.split(';').find_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                name.trim()
                    .eq_ignore_ascii_case("proto")
                    .then(|| value.trim().trim_matches('"').parse().ok())
                    .flatten()
            })
        })
        .unwrap_or_default()
}
