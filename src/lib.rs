pub mod api;
pub mod core;
pub mod scraping;
pub mod tools;

pub use crate::core::types;
pub use crate::core::types::*;
pub use crate::core::AppState;

pub use crate::scraping::rust_scraper;
