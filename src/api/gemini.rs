//! Gemini `generateContent` wire types.
//!
//! Only the parts of the API the relay touches are modelled: one user turn
//! carrying an inline image and a text prompt, and the first candidate's text
//! on the way back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::relay::ExtractionError;

// --- Request types ---

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    InlineData { inline_data: InlineData },
    Text { text: String },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

/// Assemble the single multimodal turn: image first, then the prompt.
pub fn build_generate_request(
    image_data: &str,
    mime_type: &str,
    prompt: &str,
    temperature: f32,
    max_output_tokens: u32,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: image_data.to_string(),
                    },
                },
                Part::Text {
                    text: prompt.to_string(),
                },
            ],
        }],
        generation_config: GenerationConfig {
            temperature,
            max_output_tokens,
        },
    }
}

// --- Response types ---

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Pull `candidates[0].content.parts[0].text` out of a successful reply body.
pub fn candidate_text(body: &str) -> Result<String, ExtractionError> {
    let envelope: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| ExtractionError::ResponseShape(format!("invalid envelope: {e}")))?;

    let candidate = envelope
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ExtractionError::ResponseShape("response has no candidates".to_string()))?;

    let content = candidate
        .content
        .ok_or_else(|| ExtractionError::ResponseShape("candidate has no content".to_string()))?;

    content
        .parts
        .into_iter()
        .next()
        .and_then(|p| p.text)
        .ok_or_else(|| ExtractionError::ResponseShape("candidate has no text part".to_string()))
}

/// Best-effort message from an upstream error body: `error.message` when the
/// body is the usual JSON envelope, the raw body otherwise.
pub fn upstream_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
