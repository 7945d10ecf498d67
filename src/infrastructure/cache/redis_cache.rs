//! Redis-backed cache implementation.

use std::time::Duration;

use super::service::{CacheError, CacheRepository, CacheResult};
use crate::domain::entities::UrlRecord;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Redis cache for fast redirect lookups.
///
/// Stores the whole URL record as JSON under `url:{short_code}`. Uses
/// connection pooling via `ConnectionManager` for efficient connection reuse.
/// Transport failures are returned to the caller; the orchestrator is
/// responsible for treating them as misses.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "url:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, short_code: &str) -> String {
        format!("{}{}", self.key_prefix, short_code)
    }
}

#[async_trait]
impl CacheRepository for RedisCache {
    async fn get_record(&self, short_code: &str) -> CacheResult<Option<UrlRecord>> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        let data: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| CacheError::Operation(format!("GET {}: {}", key, e)))?;

        match data {
            Some(json) => {
                let record: UrlRecord = serde_json::from_str(&json)?;
                debug!("Cache HIT: {}", short_code);
                Ok(Some(record))
            }
            None => {
                debug!("Cache MISS: {}", short_code);
                Ok(None)
            }
        }
    }

    async fn set_record(
        &self,
        short_code: &str,
        record: &UrlRecord,
        ttl: Duration,
    ) -> CacheResult<()> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        let data = serde_json::to_string(record)?;

        conn.set_ex::<_, _, ()>(&key, data, ttl.as_secs())
            .await
            .map_err(|e| CacheError::Operation(format!("SETEX {}: {}", key, e)))?;

        debug!("Cache SET: {} (TTL: {}s)", short_code, ttl.as_secs());
        Ok(())
    }

    async fn delete_record(&self, short_code: &str) -> CacheResult<()> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        let deleted: i32 = conn
            .del(&key)
            .await
            .map_err(|e| CacheError::Operation(format!("DEL {}: {}", key, e)))?;

        if deleted > 0 {
            debug!("Cache INVALIDATE: {}", short_code);
        }
        Ok(())
    }

    async fn increment_clicks(&self, _short_code: &str) -> CacheResult<()> {
        // Click counts are stale in the cache by design; stats reads go to
        // the store.
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
