//! Utility functions for URL inspection and request handling.
//!
//! - [`asset_url`] - Host location, extensions and registrable domains
//! - [`forwarded`] - Request scheme detection behind proxies

pub mod asset_url;
pub mod forwarded;
