use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::{AppState, ExtractPayload, ExtractionRequest};
use super::helpers::json_error;

/// `POST /api/gemini`
pub async fn extract_post(
    State(state): State<AppState>,
    payload: Result<Json<ExtractPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected request body");
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                return json_error(StatusCode::PAYLOAD_TOO_LARGE, "Image payload too large");
            }
            return json_error(StatusCode::BAD_REQUEST, "Invalid JSON body");
        }
    };

    match state.relay.extract(ExtractionRequest::from(payload)).await {
        Ok(rows) => (StatusCode::OK, Json(json!({ "rows": rows }))).into_response(),
        Err(e) => e.into_response(),
    }
}
