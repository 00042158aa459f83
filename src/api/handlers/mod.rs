//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod assets;
pub mod domains;
pub mod health;
pub mod rewrite;

pub use assets::{concat_base_handler, dns_prefetch_handler, upload_url_handler};
pub use domains::domain_list_handler;
pub use health::health_handler;
pub use rewrite::rewrite_handler;
