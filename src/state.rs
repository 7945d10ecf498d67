//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::infrastructure::cache::CacheRepository;

/// Process-wide handles, constructed once at startup and passed by reference
/// into handlers - no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    /// Held separately from the service for the health endpoint's cache check.
    pub cache: Arc<dyn CacheRepository>,
}

impl AppState {
    /// Creates the shared application state.
    pub fn new(url_service: Arc<UrlService>, cache: Arc<dyn CacheRepository>) -> Self {
        Self { url_service, cache }
    }
}
