//! Repository trait for URL record data access.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for the durable store of URL records.
///
/// The store is the single source of truth; all writes are durable immediately
/// upon success.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`; in-memory fakes live in `tests/common`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new URL record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists
    /// (unique constraint violation). Returns [`AppError::Internal`] on other
    /// database errors. No implicit retry.
    async fn create(&self, record: &UrlRecord) -> Result<(), AppError>;

    /// Finds a record by its short code, filtering out expired rows.
    ///
    /// A row whose `expires_at` has passed is invisible here even while it
    /// still exists physically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its identifier, regardless of expiry state.
    ///
    /// Internal lookup only; never used on a customer-facing read path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UrlRecord>, AppError>;

    /// Atomically increments the click counter for the given short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row matched the code.
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, code: &str) -> Result<(), AppError>;

    /// Bulk-deletes all rows whose expiry timestamp is at or before now.
    ///
    /// Invoked by the periodic reclamation sweep; not transactionally coupled
    /// to any read path. Returns the number of rows deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_expired(&self) -> Result<u64, AppError>;
}
