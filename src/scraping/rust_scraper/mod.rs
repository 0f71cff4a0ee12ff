//! Heuristic article body extraction.
//!
//! Pipeline for one page: prune non-content subtrees, score every selector
//! match (primary pass), mine the whole document (aggressive pass, length
//! wins), then fall back to JSON-LD, the meta description, and finally a
//! synthesized message when the text is still short. Pure and synchronous:
//! the same HTML and URL always give the same result.

mod aggressive;
mod clean;
mod jsonld;
mod metadata;
mod parse;
mod quality;
pub mod selectors;

pub use aggressive::NativeScript;
pub use clean::{clean_text, dedupe_paragraphs, jaccard_similarity, DUPLICATE_SIMILARITY};
pub use metadata::{display_host, final_fallback_message, FallbackReason, META_SUMMARY_NOTE};
pub use parse::ExtractionStrategy;
pub use quality::{meets_length_floor, score_candidate, MIN_RESULT_CHARS};
pub use selectors::{noise_selectors_for, normalize_hostname, selectors_for};

use crate::core::config::DEFAULT_EARLY_EXIT_SCORE;
use crate::core::types::{CleanedCandidate, ExtractionSource, ScoredResult};
use scraper::Html;
use tracing::{debug, info, warn};

/// Results shorter than this (chars) send the extraction down the fallback chain.
pub const FALLBACK_TRIGGER_CHARS: usize = 200;

#[derive(Debug, Clone, Copy)]
pub struct ArticleExtractor {
    early_exit_score: f64,
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_EARLY_EXIT_SCORE)
    }
}

impl ArticleExtractor {
    pub fn new(early_exit_score: f64) -> Self {
        Self { early_exit_score }
    }

    /// Extract the article body of `html`, fetched from `url`. Never fails.
    pub fn extract(&self, html: &str, url: &str) -> ScoredResult {
        let selectors = selectors_for(url);
        self.extract_with_selectors(html, url, &selectors)
    }

    /// Same as [`extract`](Self::extract) with an explicit selector order.
    pub fn extract_with_selectors(&self, html: &str, url: &str, selectors: &[&str]) -> ScoredResult {
        let document = Html::parse_document(html);
        let pruned = self.prune_noise(&document, url);

        let mut best = self.primary_pass(&pruned, selectors);
        match &best {
            Some(b) => info!(
                "Primary extraction for {}: score {:.1}, {} chars",
                url,
                b.score,
                b.char_length()
            ),
            None => info!("Primary extraction for {} found no usable candidate", url),
        }

        self.apply_aggressive_override(&pruned, &mut best);

        if best.as_ref().map_or(true, |b| b.char_length() < FALLBACK_TRIGGER_CHARS) {
            if let Some(result) = self.structured_fallback(&document) {
                best = Some(result);
            }
        }

        match best {
            Some(result) => {
                info!(
                    "Extracted {} chars from {} via {}",
                    result.char_length(),
                    url,
                    result.source.as_str()
                );
                result
            }
            None => {
                let host = display_host(url);
                warn!("No extractable content for {}, using final fallback", url);
                ScoredResult {
                    text: final_fallback_message(&host, FallbackReason::ExtractionFailed),
                    score: 0.0,
                    source: ExtractionSource::FinalFallback,
                }
            }
        }
    }

    /// The mined text replaces the current result when strictly longer and above the floor.
    fn apply_aggressive_override(&self, pruned: &Html, best: &mut Option<ScoredResult>) {
        let mined = self.mine_aggressively(pruned);
        if mined.is_empty() {
            return;
        }
        let cleaned = self.clean_candidate(&mined.join("\n\n"));
        let longer = best
            .as_ref()
            .map_or(true, |b| cleaned.char_length() > b.char_length());
        if !longer || !meets_length_floor(&cleaned) {
            return;
        }

        debug!(
            "Aggressive result ({} chars) overrides primary ({} chars)",
            cleaned.char_length(),
            best.as_ref().map_or(0, |b| b.char_length())
        );
        let score = score_candidate(&cleaned);
        *best = Some(ScoredResult {
            text: cleaned.text,
            score,
            source: ExtractionSource::Aggressive,
        });
    }

    /// JSON-LD body, else meta description. Reads the unpruned document.
    fn structured_fallback(&self, document: &Html) -> Option<ScoredResult> {
        if let Some(body) = self.extract_json_ld_body(document) {
            debug!("Using JSON-LD article body");
            return Some(Self::scored(body, ExtractionSource::JsonLd));
        }
        if let Some(summary) = self.extract_meta_description(document) {
            debug!("Using meta description");
            return Some(Self::scored(summary, ExtractionSource::Meta));
        }
        None
    }

    fn scored(text: String, source: ExtractionSource) -> ScoredResult {
        let cleaned = CleanedCandidate::from_text(text);
        let score = score_candidate(&cleaned);
        ScoredResult {
            text: cleaned.text,
            score,
            source,
        }
    }
}
