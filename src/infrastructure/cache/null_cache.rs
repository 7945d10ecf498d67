//! No-op cache implementation for testing or disabled caching.

use std::time::Duration;

use super::service::{CacheRepository, CacheResult};
use crate::domain::entities::UrlRecord;
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is unavailable or caching is explicitly disabled. Every
/// read is a clean miss and every write succeeds immediately, so all lookups
/// fall through to the store.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheRepository for NullCache {
    async fn get_record(&self, _short_code: &str) -> CacheResult<Option<UrlRecord>> {
        Ok(None)
    }

    async fn set_record(
        &self,
        _short_code: &str,
        _record: &UrlRecord,
        _ttl: Duration,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn delete_record(&self, _short_code: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn increment_clicks(&self, _short_code: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
