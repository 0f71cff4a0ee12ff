use crate::core::types::{ArticleContentResponse, ExtractionSource};
use crate::rust_scraper::{display_host, final_fallback_message, ArticleExtractor, FallbackReason};
use crate::scraping::fetcher::fetch_with_timeout;
use crate::AppState;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Cache → fetch → extract → cache for one article URL.
///
/// Never fails: fetch problems become a readable message plus a diagnostic
/// `error`, and extraction always yields some text. Only real extractions are
/// cached, so a failed or empty page is retried on the next request.
pub async fn extract_article_content(state: &Arc<AppState>, url: &Url) -> ArticleContentResponse {
    let key = url.as_str();

    if let Some(cached) = state.content_cache.get(key).await {
        info!("Serving article content for {} from cache", key);
        return ArticleContentResponse::ok(cached);
    }

    let timeout = state.config.resolve_fetch_timeout();
    let html = match fetch_with_timeout(state.fetcher.as_ref(), url, timeout).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Fetching {} failed: {}", key, e);
            let host = display_host(key);
            return ArticleContentResponse::degraded(
                final_fallback_message(&host, FallbackReason::FetchFailed),
                e.to_string(),
            );
        }
    };

    let extractor = ArticleExtractor::new(state.config.resolve_early_exit_score());
    let result = extractor.extract(&html, key);

    if result.source == ExtractionSource::FinalFallback {
        info!("Nothing extractable at {}; not caching the fallback message", key);
    } else {
        state.content_cache.put(key, result.text.clone()).await;
    }

    ArticleContentResponse::ok(result.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::ContentCache;
    use crate::core::config::ExtractorConfig;
    use crate::core::error::FetchError;
    use crate::scraping::fetcher::HtmlFetcher;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    struct StaticFetcher {
        html: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HtmlFetcher for StaticFetcher {
        async fn fetch(&self, _url: &Url, _cancel: CancellationToken) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.html.to_string())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl HtmlFetcher for FailingFetcher {
        async fn fetch(&self, _url: &Url, _cancel: CancellationToken) -> Result<String, FetchError> {
            Err(FetchError::Status(503))
        }
    }

    fn state_with(fetcher: Arc<dyn HtmlFetcher>) -> Arc<AppState> {
        Arc::new(AppState::with_parts(
            fetcher,
            ContentCache::new(Duration::from_secs(1800), 100),
            ExtractorConfig::default(),
        ))
    }

    #[tokio::test]
    async fn empty_page_gets_fallback_and_is_not_cached() {
        let fetcher = Arc::new(StaticFetcher {
            html: "<html><body><p>nope</p></body></html>",
            calls: AtomicUsize::new(0),
        });
        let state = state_with(fetcher.clone());
        let url = Url::parse("https://empty.example.com/a").unwrap();

        let first = extract_article_content(&state, &url).await;
        assert!(first.error.is_none());
        assert!(first.content.contains("empty.example.com"));

        extract_article_content(&state, &url).await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn http_error_is_reported_softly() {
        let state = state_with(Arc::new(FailingFetcher));
        let url = Url::parse("https://down.example.com/story/9").unwrap();

        let response = extract_article_content(&state, &url).await;
        assert!(response.content.contains("down.example.com"));
        assert_eq!(response.error.as_deref(), Some("upstream returned HTTP 503"));
        assert!(state.content_cache.entry(url.as_str()).await.is_none());
    }
}
