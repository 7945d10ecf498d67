#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use shortcode::application::services::UrlService;
use shortcode::domain::entities::UrlRecord;
use shortcode::domain::repositories::UrlRepository;
use shortcode::error::AppError;
use shortcode::infrastructure::cache::{CacheError, CacheRepository, CacheResult};
use shortcode::state::AppState;

pub const TEST_BASE_URL: &str = "http://sho.rt";
pub const TEST_SHORT_LENGTH: usize = 6;

/// In-memory stand-in for the PostgreSQL repository.
///
/// Mirrors the production semantics: inserts conflict on any physically
/// present row, lookups by code filter out expired rows, increments touch any
/// present row.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    rows: Mutex<HashMap<String, UrlRecord>>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record directly, bypassing the service layer.
    pub fn seed(&self, record: UrlRecord) {
        self.rows
            .lock()
            .unwrap()
            .insert(record.short_code.clone(), record);
    }

    /// Current click count for a code, or None if absent.
    pub fn clicks(&self, code: &str) -> Option<i64> {
        self.rows.lock().unwrap().get(code).map(|r| r.clicks)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, record: &UrlRecord) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&record.short_code) {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": record.short_code }),
            ));
        }
        rows.insert(record.short_code.clone(), record.clone());
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .get(code)
            .filter(|r| r.expires_at.is_none_or(|e| e > Utc::now()))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UrlRecord>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.values().find(|r| r.id == id).cloned())
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(code) {
            Some(record) => {
                record.clicks += 1;
                Ok(())
            }
            None => Err(AppError::not_found("Url not found", json!({ "code": code }))),
        }
    }

    async fn delete_expired(&self) -> Result<u64, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|_, r| r.expires_at.is_none_or(|e| e > Utc::now()));
        Ok((before - rows.len()) as u64)
    }
}

/// In-memory cache honoring per-entry TTL.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (UrlRecord, Instant)>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a cache entry directly with a generous TTL.
    pub fn seed(&self, record: UrlRecord) {
        self.entries.lock().unwrap().insert(
            record.short_code.clone(),
            (record, Instant::now() + Duration::from_secs(3600)),
        );
    }

    pub fn contains(&self, code: &str) -> bool {
        let entries = self.entries.lock().unwrap();
        entries
            .get(code)
            .is_some_and(|(_, deadline)| *deadline > Instant::now())
    }
}

#[async_trait]
impl CacheRepository for InMemoryCache {
    async fn get_record(&self, short_code: &str) -> CacheResult<Option<UrlRecord>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(short_code)
            .filter(|(_, deadline)| *deadline > Instant::now())
            .map(|(record, _)| record.clone()))
    }

    async fn set_record(
        &self,
        short_code: &str,
        record: &UrlRecord,
        ttl: Duration,
    ) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(short_code.to_string(), (record.clone(), Instant::now() + ttl));
        Ok(())
    }

    async fn delete_record(&self, short_code: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(short_code);
        Ok(())
    }

    async fn increment_clicks(&self, _short_code: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Cache whose every operation fails with a transport error.
///
/// Used to verify the fail-open policy: cache errors must never fail a
/// request.
pub struct FailingCache;

#[async_trait]
impl CacheRepository for FailingCache {
    async fn get_record(&self, _short_code: &str) -> CacheResult<Option<UrlRecord>> {
        Err(CacheError::Operation("cache unavailable".to_string()))
    }

    async fn set_record(
        &self,
        _short_code: &str,
        _record: &UrlRecord,
        _ttl: Duration,
    ) -> CacheResult<()> {
        Err(CacheError::Operation("cache unavailable".to_string()))
    }

    async fn delete_record(&self, _short_code: &str) -> CacheResult<()> {
        Err(CacheError::Operation("cache unavailable".to_string()))
    }

    async fn increment_clicks(&self, _short_code: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Fully wired test fixture backed by in-memory fakes.
pub struct TestContext {
    pub state: AppState,
    pub repo: Arc<InMemoryUrlRepository>,
    pub cache: Arc<InMemoryCache>,
}

/// Builds an [`AppState`] over in-memory fakes; no external services needed.
pub fn create_test_state() -> TestContext {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let cache = Arc::new(InMemoryCache::new());

    let state = AppState::new(
        Arc::new(UrlService::new(
            repo.clone(),
            cache.clone(),
            TEST_BASE_URL.to_string(),
            TEST_SHORT_LENGTH,
            Duration::from_secs(60),
        )),
        cache.clone(),
    );

    TestContext { state, repo, cache }
}

/// Builds an [`AppState`] with a custom cache implementation.
pub fn create_test_state_with_cache(
    cache: Arc<dyn CacheRepository>,
) -> (AppState, Arc<InMemoryUrlRepository>) {
    let repo = Arc::new(InMemoryUrlRepository::new());

    let state = AppState::new(
        Arc::new(UrlService::new(
            repo.clone(),
            cache.clone(),
            TEST_BASE_URL.to_string(),
            TEST_SHORT_LENGTH,
            Duration::from_secs(60),
        )),
        cache,
    );

    (state, repo)
}
