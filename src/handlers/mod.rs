pub mod helpers;
pub mod extract;
pub mod system;
