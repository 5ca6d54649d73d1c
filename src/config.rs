use std::env;
use std::path::Path;
use std::time::Duration;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

/// Server-side Gemini key. Blank values are treated as unset.
pub fn get_gemini_api_key() -> Option<String> {
    env::var("GEMINI_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

pub fn get_gemini_model() -> String {
    env::var("GEMINI_MODEL")
        .ok()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("GEMINI_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_request_timeout() -> Duration {
    Duration::from_secs(parse_env_or("GEMINI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS))
}

pub fn get_max_output_tokens() -> u32 {
    parse_env_or("GEMINI_MAX_OUTPUT_TOKENS", DEFAULT_MAX_OUTPUT_TOKENS)
}

pub fn get_static_dir() -> String {
    env::var("STATIC_DIR")
        .ok()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
}

pub fn get_max_body_bytes() -> usize {
    parse_env_or("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)
}

fn parse_env_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(variable = name, value = %raw, %default, "Unparsable value, using default");
                default
            }
        },
        _ => default,
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Read-only upstream settings, resolved once at startup and handed to the relay.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub api_base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub max_output_tokens: u32,
    pub temperature: f32,
    /// Server-side credential; always preferred over one supplied by the caller.
    pub api_key: Option<String>,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            api_key: None,
        }
    }
}

impl RelaySettings {
    pub fn from_env() -> Self {
        Self {
            api_base_url: get_api_base_url(),
            model: get_gemini_model(),
            timeout: get_request_timeout(),
            max_output_tokens: get_max_output_tokens(),
            temperature: DEFAULT_TEMPERATURE,
            api_key: get_gemini_api_key(),
        }
    }
}
