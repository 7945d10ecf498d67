//! Handler for the URL shortening endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/v1/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/page",
///   "custom_code": "promo1",                 // optional
///   "expires_at": "2027-01-01T00:00:00Z"     // optional
/// }
/// ```
///
/// # Responses
///
/// - **201 Created** with the response view on success
/// - **200 OK** with an error body on validation failure (legacy contract)
/// - **409 Conflict** if the short code already exists
/// - **500 Internal Server Error** on persistence failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Response {
    if let Err(e) = payload.validate() {
        return validation_reply(AppError::from(e));
    }

    let result = state
        .url_service
        .create_short_url(payload.original_url, payload.custom_code, payload.expires_at)
        .await;

    match result {
        Ok(record) => {
            let body = ShortenResponse {
                id: record.id.to_string(),
                short_url: state.url_service.short_url(&record.short_code),
                short_code: record.short_code,
                original_url: record.original_url,
                created_at: record.created_at,
                clicks: record.clicks,
                expires_at: record.expires_at,
            };
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(err @ AppError::Validation { .. }) => validation_reply(err),
        Err(err) => err.into_response(),
    }
}

/// Legacy contract: validation failures answer 200 with an error body, not 400.
fn validation_reply(err: AppError) -> Response {
    let body = ErrorBody {
        error: err.to_error_info(),
    };
    (StatusCode::OK, Json(body)).into_response()
}
