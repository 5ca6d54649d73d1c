//! Image-to-rows relay.
//!
//! Takes a base64 image, sends it to Gemini together with the fixed
//! extraction prompt, and turns the model's free-text answer into a list of
//! JSON rows. Each call is independent: one outbound request, no retries,
//! nothing kept between calls.

mod error;
mod normalize;
mod prompt;

pub use error::ExtractionError;
pub use normalize::{coerce_rows, normalize_model_text, parse_rows};
pub use prompt::EXTRACTION_PROMPT;

use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::api::{build_generate_request, candidate_text, upstream_error_message, HttpTransport, Transport};
use crate::config::RelaySettings;
use crate::models::ExtractionRequest;
use crate::utils::generate_content_url;

pub struct Relay {
    settings: RelaySettings,
    transport: Arc<dyn Transport>,
}

impl Relay {
    pub fn new(settings: RelaySettings, transport: Arc<dyn Transport>) -> Self {
        Self { settings, transport }
    }

    /// Relay backed by a real HTTP client using the configured timeout.
    pub fn with_http(settings: RelaySettings) -> Result<Self, ExtractionError> {
        let transport = HttpTransport::new(settings.timeout)?;
        Ok(Self::new(settings, Arc::new(transport)))
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    pub fn key_configured(&self) -> bool {
        self.settings.api_key.is_some()
    }

    /// The configured key wins; otherwise the caller's, if non-blank.
    pub fn resolve_credential(&self, supplied: Option<&str>) -> Option<String> {
        self.settings
            .api_key
            .clone()
            .or_else(|| supplied.map(str::trim).filter(|k| !k.is_empty()).map(str::to_string))
    }

    pub async fn extract(&self, request: ExtractionRequest) -> Result<Vec<Value>, ExtractionError> {
        let api_key = self.resolve_credential(request.credential.as_deref()).ok_or_else(|| {
            ExtractionError::MissingInput(
                "Gemini API key not configured. Set GEMINI_API_KEY or supply apiKey in the request.".to_string(),
            )
        })?;
        if request.image_data.is_empty() {
            return Err(ExtractionError::MissingInput("No image data received".to_string()));
        }

        let payload = build_generate_request(
            &request.image_data,
            &request.mime_type,
            EXTRACTION_PROMPT,
            self.settings.temperature,
            self.settings.max_output_tokens,
        );
        let body = serde_json::to_value(&payload)
            .map_err(|e| ExtractionError::ResponseShape(format!("failed to encode request: {e}")))?;
        let url = generate_content_url(&self.settings.api_base_url, &self.settings.model, &api_key);

        tracing::info!(
            model = %self.settings.model,
            mime_type = %request.mime_type,
            image_bytes = request.image_data.len(),
            "Sending extraction request"
        );
        let start = Instant::now();

        let reply = self.transport.post_json(&url, &body).await.map_err(|e| {
            tracing::error!(%e, "Gemini API unreachable");
            e
        })?;

        if !reply.is_success() {
            let message = upstream_error_message(&reply.body);
            tracing::warn!(status = reply.status, %message, "Gemini API rejected request");
            return Err(ExtractionError::UpstreamRejected {
                status: reply.status,
                message,
            });
        }

        let rows = candidate_text(&reply.body)
            .and_then(|text| parse_rows(&text))
            .map_err(|e| {
                tracing::error!(%e, "Unusable Gemini response");
                e
            })?;

        tracing::info!(
            rows = rows.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Extraction complete"
        );
        Ok(rows)
    }
}
