//! DTO for the stats endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Click statistics for a short code.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}
