//! URL creation, resolution, and stats orchestration.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::warn;
use url::Url;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheRepository;
use crate::utils::code_generator::{generate_code, validate_custom_code};

/// Orchestrates the store and cache for create, redirect-resolve, and stats.
///
/// Owns the consistency policy: the store is authoritative, the cache is a
/// fail-open acceleration layer, and record expiry is checked here regardless
/// of which layer served the record. Constructed once at startup with
/// explicit handles - no ambient globals.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheRepository>,
    base_url: String,
    short_len: usize,
    cache_ttl: Duration,
}

impl UrlService {
    /// Creates a new URL service.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheRepository>,
        base_url: String,
        short_len: usize,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            base_url,
            short_len,
            cache_ttl,
        }
    }

    /// Creates a short URL record.
    ///
    /// A supplied custom code is validated and checked optimistically against
    /// the store; this check and the subsequent insert are not atomic, so a
    /// concurrent create can still surface the store's unique violation as a
    /// conflict. Without a custom code, a time-salted code is derived - two
    /// requests for the same URL produce different codes.
    ///
    /// Creation success is defined solely by successful persistence: the
    /// cache write afterwards is best-effort and its failure is swallowed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL or custom code,
    /// [`AppError::Conflict`] if the short code already exists, and
    /// [`AppError::Internal`] on persistence failure.
    pub async fn create_short_url(
        &self,
        original_url: String,
        custom_code: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<UrlRecord, AppError> {
        validate_original_url(&original_url)?;

        let custom = custom_code.filter(|c| !c.is_empty());

        let short_code = if let Some(custom) = custom {
            validate_custom_code(&custom)?;

            if self.repository.find_by_code(&custom).await?.is_some() {
                return Err(AppError::conflict(
                    "Short code already exists",
                    json!({ "code": custom }),
                ));
            }

            custom
        } else {
            generate_code(&original_url, self.short_len)?
        };

        let record = UrlRecord::new(short_code, original_url, expires_at);

        self.repository.create(&record).await?;

        if let Err(e) = self
            .cache
            .set_record(&record.short_code, &record, self.cache_ttl)
            .await
        {
            warn!("Failed to cache url {}: {e}", record.short_code);
        }

        Ok(record)
    }

    /// Resolves a short code to its original URL for redirecting.
    ///
    /// Cache-aside read: a cache error is logged and treated as a miss, a miss
    /// falls back to the store and best-effort repopulates the cache. The
    /// record's expiry is checked here regardless of source, so an expired URL
    /// never redirects even from a stale cache copy.
    ///
    /// The click increment is dispatched as a detached task with its own
    /// repository handle, deliberately decoupled from this request's
    /// cancellation; its failure is unobservable by design.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an absent or expired code and
    /// [`AppError::Internal`] on store failure.
    pub async fn resolve_url(&self, code: &str) -> Result<String, AppError> {
        let cached = match self.cache.get_record(code).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!("Failed to get {code} from cache: {e}");
                None
            }
        };

        let record = match cached {
            Some(record) => record,
            None => {
                let record = self
                    .repository
                    .find_by_code(code)
                    .await?
                    .ok_or_else(|| AppError::not_found("Url not found", json!({ "code": code })))?;

                if let Err(e) = self.cache.set_record(code, &record, self.cache_ttl).await {
                    warn!("Failed to cache url {code}: {e}");
                }

                record
            }
        };

        if record.is_expired() {
            return Err(AppError::not_found("Url not found", json!({ "code": code })));
        }

        let repository = Arc::clone(&self.repository);
        let code = code.to_string();
        tokio::spawn(async move {
            if let Err(e) = repository.increment_clicks(&code).await {
                warn!("Failed to increment clicks for {code}: {e}");
            }
        });

        Ok(record.original_url)
    }

    /// Retrieves stats for a short code.
    ///
    /// Always reads through the store, never the cache: cached click counts
    /// are stale by design.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is absent or expired.
    pub async fn get_url_stats(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Url not found", json!({ "code": code })))
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}

/// Validates that the original URL is a well-formed absolute URL.
fn validate_original_url(original_url: &str) -> Result<(), AppError> {
    if original_url.is_empty() {
        return Err(AppError::bad_request(
            "Original URL must not be empty",
            json!({}),
        ));
    }

    let parsed = Url::parse(original_url).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    if !parsed.has_host() {
        return Err(AppError::bad_request(
            "URL must be absolute",
            json!({ "url": original_url }),
        ));
    }

    Ok(())
}
