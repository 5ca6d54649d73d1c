use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::relay::ExtractionError;

/// `{ "error": message }` with the given status.
pub fn json_error<S: Into<String>>(status: StatusCode, message: S) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for ExtractionError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
        json_error(status, self.to_string())
    }
}
