pub mod browser_headers;
pub mod fetcher;
pub mod rust_scraper;

pub use fetcher::{fetch_with_timeout, HtmlFetcher, ReqwestFetcher};
pub use rust_scraper::ArticleExtractor;
