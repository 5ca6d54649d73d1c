use serde::Deserialize;

use crate::config::DEFAULT_MIME_TYPE;

/// Inbound body of `POST /api/gemini`.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractPayload {
    #[serde(default)]
    pub image_b64: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// One extraction call. Built per request and never persisted.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Base64 image payload, forwarded to the upstream untouched.
    pub image_data: String,
    pub mime_type: String,
    pub credential: Option<String>,
}

impl ExtractionRequest {
    pub fn new(image_data: impl Into<String>, mime_type: impl Into<String>, credential: Option<String>) -> Self {
        Self {
            image_data: image_data.into(),
            mime_type: mime_type.into(),
            credential,
        }
    }
}

impl From<ExtractPayload> for ExtractionRequest {
    fn from(payload: ExtractPayload) -> Self {
        let mime_type = payload
            .mime_type
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
        Self {
            image_data: payload.image_b64.unwrap_or_default(),
            mime_type,
            credential: payload.api_key,
        }
    }
}
