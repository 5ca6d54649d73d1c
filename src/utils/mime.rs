use std::path::Path;

use crate::config::DEFAULT_MIME_TYPE;

/// Guess an image MIME type from a file extension, defaulting to JPEG.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "pdf" => "application/pdf",
        other => {
            tracing::warn!("Unknown image extension '{other}', defaulting to {DEFAULT_MIME_TYPE}");
            DEFAULT_MIME_TYPE
        }
    }
}
