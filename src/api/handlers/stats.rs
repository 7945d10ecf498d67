//! Handler for short URL statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves click statistics for a short code.
///
/// # Endpoint
///
/// `GET /api/v1/stats/{code}`
///
/// Always served from the store; cached click counts are stale by design, so
/// the count here reflects every increment that has settled.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist or has expired.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let record = state.url_service.get_url_stats(&code).await?;

    Ok(Json(StatsResponse {
        short_code: record.short_code,
        original_url: record.original_url,
        clicks: record.clicks,
        created_at: record.created_at,
    }))
}
