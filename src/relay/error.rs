/// Error types for the relay
use thiserror::Error;

/// Everything that can go wrong between receiving an image and returning rows.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Caller omitted the image, or no credential could be resolved
    #[error("{0}")]
    MissingInput(String),

    /// Upstream answered with a non-2xx status
    #[error("Gemini API error: {message}")]
    UpstreamRejected {
        /// Upstream HTTP status, forwarded to the caller
        status: u16,
        /// `error.message` from the upstream envelope, or the raw body
        message: String,
    },

    /// Network, DNS, TLS or timeout failure reaching the upstream
    #[error("Could not reach Gemini API: {0}")]
    UpstreamUnreachable(String),

    /// Upstream replied but the envelope did not carry candidate text
    #[error("Failed to parse Gemini response: {0}")]
    ResponseShape(String),

    /// Candidate text was not valid JSON after fence stripping
    #[error("Failed to parse Gemini response: {reason}; raw text: {raw}")]
    Parse {
        reason: String,
        raw: String,
    },
}

impl ExtractionError {
    /// HTTP status to report to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            ExtractionError::MissingInput(_) => 400,
            ExtractionError::UpstreamRejected { status, .. } => {
                if (100..=999).contains(status) {
                    *status
                } else {
                    502
                }
            }
            ExtractionError::UpstreamUnreachable(_) => 502,
            ExtractionError::ResponseShape(_) | ExtractionError::Parse { .. } => 500,
        }
    }
}
