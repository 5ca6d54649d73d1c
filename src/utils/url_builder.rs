/// Build the `generateContent` endpoint for a model.
///
/// The credential travels as the `key` query parameter, so the result must
/// never be logged as-is.
pub fn generate_content_url(base_url: &str, model: &str, api_key: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let model = model.trim().trim_start_matches("models/");
    format!("{}/models/{}:generateContent?key={}", base, model, urlencoding::encode(api_key))
}
