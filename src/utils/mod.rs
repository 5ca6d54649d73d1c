// URL handling utilities
pub mod url_builder;

// JSON utilities
pub mod json_converter;

// Input helpers
pub mod mime;
pub mod secret;

// Re-export all utilities for convenient access
pub use url_builder::generate_content_url;
pub use json_converter::cell_text;
pub use mime::mime_type_for_path;
pub use secret::mask_secret;
