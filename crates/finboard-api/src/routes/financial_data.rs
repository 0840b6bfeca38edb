//! Chart payload endpoint
//!
//! Served to browser charts on other origins, so the router applies a
//! permissive CORS layer. Any fetch failure is reported as a 400 with an
//! `error` message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::AppState;

pub async fn api_financial_data(state: axum::extract::State<AppState>) -> Response {
    match state.data_source.fetch_financial_data().await {
        Ok(data) => Json(data).into_response(),
        Err(e) => {
            log::warn!("Financial data fetch failed: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
