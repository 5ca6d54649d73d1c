// Upstream API modules
pub mod client;
pub mod gemini;

// Re-export commonly used items
pub use client::{HttpTransport, Transport, UpstreamReply};
pub use gemini::{build_generate_request, candidate_text, upstream_error_message, GenerateContentRequest};
