use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::models::AppState;

/// `GET /api/status`: whether a server-side key is configured.
pub async fn status_get(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "keyConfigured": state.key_configured() }))
}
