//! URL record entity representing a short code → original URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shortened URL mapping with metadata.
///
/// The store is the single source of truth for this record; the cache holds a
/// JSON copy with its own TTL and never wins a disagreement. The short code is
/// immutable once created and the click count only increases.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: Uuid,
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub clicks: i64,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UrlRecord {
    /// Creates a fresh record for a newly shortened URL.
    ///
    /// Assigns a random identifier, stamps both timestamps with the current
    /// UTC time, and starts the click count at zero.
    pub fn new(
        short_code: String,
        original_url: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            short_code,
            original_url,
            created_at: now,
            updated_at: now,
            clicks: 0,
            expires_at,
        }
    }

    /// Returns true if the record has passed its expiry time.
    ///
    /// An expired record is logically absent from all read paths even while
    /// the row still exists physically, until the reclamation sweep deletes it.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| e < Utc::now())
    }
}
