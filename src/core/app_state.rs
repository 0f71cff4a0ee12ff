use crate::core::cache::ContentCache;
use crate::core::config::ExtractorConfig;
use crate::core::error::FetchError;
use crate::scraping::fetcher::{HtmlFetcher, ReqwestFetcher};
use std::sync::Arc;

/// Process-wide state shared by every request handler.
///
/// Built once at startup; the cache handle lives as long as the process.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn HtmlFetcher>,
    pub content_cache: ContentCache,
    /// File-based config loaded from `article-extract.json` (env-var fallback for all fields).
    pub config: Arc<ExtractorConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("content_cache", &self.content_cache)
            .field("config", &self.config)
            .finish()
    }
}

impl AppState {
    /// Production state: reqwest fetcher and a cache sized from `config`.
    pub fn new(config: ExtractorConfig) -> Result<Self, FetchError> {
        let client = ReqwestFetcher::build_client(
            config.resolve_fetch_timeout(),
            config.resolve_connect_timeout(),
        )?;
        let content_cache =
            ContentCache::new(config.resolve_cache_ttl(), config.resolve_cache_capacity());
        Ok(Self::with_parts(
            Arc::new(ReqwestFetcher::new(client)),
            content_cache,
            config,
        ))
    }

    pub fn with_parts(
        fetcher: Arc<dyn HtmlFetcher>,
        content_cache: ContentCache,
        config: ExtractorConfig,
    ) -> Self {
        Self {
            fetcher,
            content_cache,
            config: Arc::new(config),
        }
    }
}
