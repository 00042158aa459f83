//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Longest TTL any backend stores (one year). Larger values are clamped.
pub const MAX_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key/value store with per-entry expiry.
///
/// Shared by every execution context in the process (and, for Redis, across
/// processes). Implementations must be thread-safe and fail open: a backend
/// error is logged and reported as a miss or a no-op write, never as an error
/// that would block a rewrite.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis with `SETEX`
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process map with deadlines
/// - [`crate::infrastructure::cache::NullCache`] - Never stores anything
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Reads a value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on a live entry
    /// - `Ok(None)` on a miss, an expired entry or a backend error
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value that expires after `ttl_seconds`, clamped to
    /// [`MAX_TTL_SECONDS`].
    ///
    /// Overwrites any existing entry and restarts its TTL.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reports and logs.
    fn backend(&self) -> &'static str;
}
