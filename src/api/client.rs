use async_trait::async_trait;
use serde_json::Value;
use std::error::Error as _;
use std::time::Duration;

use crate::relay::ExtractionError;

/// Raw upstream answer: status plus undecoded body.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound HTTP seam. One call per extraction, no retries.
///
/// Uses `async_trait` so the relay can hold an `Arc<dyn Transport>` and tests
/// can swap in a mock.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON. Only transport-level failures are errors; any
    /// HTTP status comes back as an `UpstreamReply`.
    async fn post_json(&self, url: &str, body: &Value) -> Result<UpstreamReply, ExtractionError>;
}

/// reqwest-backed transport with a bounded per-request timeout.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, ExtractionError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("qc-relay/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractionError::UpstreamUnreachable(format!("Failed to create HTTP client: {}", describe_error(e))))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<UpstreamReply, ExtractionError> {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ExtractionError::UpstreamUnreachable(describe_error(e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ExtractionError::UpstreamUnreachable(describe_error(e)))?;

        Ok(UpstreamReply { status, body })
    }
}

/// Flatten a reqwest error and its sources into one line, minus the URL
/// (it carries the API key).
fn describe_error(err: reqwest::Error) -> String {
    let timed_out = err.is_timeout();
    let err = err.without_url();
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !parts.iter().any(|p| p.contains(&text)) {
            parts.push(text);
        }
        source = cause.source();
    }
    let mut reason = parts.join(": ");
    if timed_out && !reason.contains("timed out") {
        reason.push_str(" (timed out)");
    }
    reason
}
