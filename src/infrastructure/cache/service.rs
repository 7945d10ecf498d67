//! Cache repository trait and error types.

use std::time::Duration;

use crate::domain::entities::UrlRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// These never reach an HTTP response: the orchestrator downgrades them to a
/// logged warning and a conceptual cache miss (fail-open).
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for the acceleration cache in front of the store.
///
/// The cache holds JSON copies of whole URL records under namespaced keys with
/// an independent TTL. It never checks a record's own expiry field - that is
/// the orchestrator's responsibility - and it is never authoritative: on any
/// disagreement the store wins.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheRepository: Send + Sync {
    /// Retrieves the cached record for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` on cache hit
    /// - `Ok(None)` on a clean cache miss
    ///
    /// # Errors
    ///
    /// Returns an error only on transport or deserialization failure; a clean
    /// miss is not an error.
    async fn get_record(&self, short_code: &str) -> CacheResult<Option<UrlRecord>>;

    /// Stores a record under the namespaced key for `short_code`, expiring
    /// after `ttl`.
    async fn set_record(
        &self,
        short_code: &str,
        record: &UrlRecord,
        ttl: Duration,
    ) -> CacheResult<()>;

    /// Removes the cached entry for a short code.
    ///
    /// Kept for invalidation; not currently triggered by any write path.
    async fn delete_record(&self, short_code: &str) -> CacheResult<()>;

    /// Intentionally a no-op: click counts are never kept fresh in the cache.
    ///
    /// Stats reads always go to the store, so cached click counts are stale by
    /// design. The method exists for interface parity with the store contract.
    async fn increment_clicks(&self, short_code: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
