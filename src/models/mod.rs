pub mod app_state;
pub mod extraction_request;
pub mod product_row;

pub use app_state::AppState;
pub use extraction_request::{ExtractPayload, ExtractionRequest};
pub use product_row::ProductRow;
