pub mod api;
pub mod config;
pub mod handlers;
pub mod models;
pub mod relay;
pub mod routes;
pub mod utils;

pub use models::{AppState, ExtractionRequest, ProductRow};
pub use relay::{ExtractionError, Relay};
pub use routes::build_router;
