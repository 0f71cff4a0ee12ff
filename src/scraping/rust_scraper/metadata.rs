use super::clean::normalize_whitespace;
use super::ArticleExtractor;
use scraper::{Html, Selector};
use url::Url;

/// Appended to a meta-description result so readers know it is not the article itself.
pub const META_SUMMARY_NOTE: &str = "(This is the summary provided by the publisher, not the full article. \
Open the original article to read the complete text.)";

/// Meta descriptions must be longer than this (chars) to be used.
const MIN_META_CHARS: usize = 100;

const META_SELECTORS: &[&str] = &[
    r#"meta[name="description"]"#,
    r#"meta[property="og:description"]"#,
    r#"meta[name="twitter:description"]"#,
];

/// Why the final fallback message is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The page loaded but no usable text was found.
    ExtractionFailed,
    /// The page could not be retrieved (timeout, HTTP error, network failure).
    FetchFailed,
}

/// Host as the reader would recognise it; falls back to the raw input.
pub fn display_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

/// User-facing text shown when nothing could be extracted. Never empty.
pub fn final_fallback_message(host: &str, reason: FallbackReason) -> String {
    let headline = match reason {
        FallbackReason::ExtractionFailed => {
            format!("We couldn't extract the article text from {host}.")
        }
        FallbackReason::FetchFailed => {
            format!("We couldn't load the article from {host} right now.")
        }
    };
    format!(
        "{headline}\n\n\
         Please open the original article on {host} to read it in full.\n\n\
         An AI summary may still be available for this article."
    )
}

impl ArticleExtractor {
    /// First sufficiently long meta description, followed by `META_SUMMARY_NOTE`.
    pub(super) fn extract_meta_description(&self, document: &Html) -> Option<String> {
        for raw in META_SELECTORS {
            let Ok(selector) = Selector::parse(raw) else {
                continue;
            };
            let description = document
                .select(&selector)
                .filter_map(|meta| meta.value().attr("content"))
                .map(normalize_whitespace)
                .find(|d| d.chars().count() > MIN_META_CHARS);
            if let Some(desc) = description {
                return Some(format!("{desc}\n\n{META_SUMMARY_NOTE}"));
            }
        }
        None
    }
}
