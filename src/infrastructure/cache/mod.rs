//! TTL cache backends shared across execution contexts.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - Redis-backed cache shared between processes
//! - [`MemoryCache`] - In-process cache for single-instance deployments and tests
//! - [`NullCache`] - No-op implementation, every read is a miss

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService, MAX_TTL_SECONDS};
