use std::sync::Arc;

use crate::relay::Relay;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    /// Directory holding `index.html` and other static assets.
    pub static_dir: String,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn key_configured(&self) -> bool {
        self.relay.key_configured()
    }
}
