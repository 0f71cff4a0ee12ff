use super::ArticleExtractor;
use crate::core::types::{CleanedCandidate, ExtractionSource, ScoredResult};
use tracing::debug;

/// Minimum length (chars, exclusive) for any accepted result.
pub const MIN_RESULT_CHARS: usize = 50;

/// `words + paragraphs * 10 + (chars / paragraphs) / 10`; paragraph-less text scores its words only.
pub fn score_candidate(cleaned: &CleanedCandidate) -> f64 {
    let words = cleaned.word_count as f64;
    if cleaned.paragraph_count == 0 {
        return words;
    }
    let paragraphs = cleaned.paragraph_count as f64;
    let avg_len = cleaned.char_length() as f64 / paragraphs;
    words + paragraphs * 10.0 + avg_len / 10.0
}

/// Length floor every non-fallback result must clear.
pub fn meets_length_floor(cleaned: &CleanedCandidate) -> bool {
    cleaned.char_length() > MIN_RESULT_CHARS && cleaned.paragraph_count >= 1
}

impl ArticleExtractor {
    /// Replace `best` with `cleaned` when it clears the floor and strictly beats
    /// the current score. Returns whether a replacement happened.
    pub(super) fn consider(
        &self,
        best: &mut Option<ScoredResult>,
        cleaned: CleanedCandidate,
        source: ExtractionSource,
    ) -> bool {
        if !meets_length_floor(&cleaned) {
            return false;
        }
        let score = score_candidate(&cleaned);
        if best.as_ref().is_some_and(|b| score <= b.score) {
            return false;
        }
        debug!(
            "New best candidate: score {:.1}, {} paragraphs, {} chars ({})",
            score,
            cleaned.paragraph_count,
            cleaned.char_length(),
            source.as_str()
        );
        *best = Some(ScoredResult {
            text: cleaned.text,
            score,
            source,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ArticleExtractor {
        ArticleExtractor::new(500.0)
    }

    #[test]
    fn score_follows_formula() {
        // 2 paragraphs, 8 words, 60 chars
        let text = format!("{}\n\n{}", "alpha beta gamma delta epsilon", "one two three");
        let cleaned = CleanedCandidate::from_text(text);
        let expected = 8.0 + 20.0 + (cleaned.char_length() as f64 / 2.0) / 10.0;
        assert!((score_candidate(&cleaned) - expected).abs() < 1e-9);
    }

    #[test]
    fn short_text_never_becomes_best() {
        let mut best = None;
        let cleaned = CleanedCandidate::from_text("A headline only, forty-odd chars".to_string());
        assert!(!extractor().consider(&mut best, cleaned, ExtractionSource::Primary));
        assert!(best.is_none());
    }

    #[test]
    fn only_strict_improvement_replaces() {
        let ex = extractor();
        let text = "The committee met on Tuesday and agreed to publish its findings next month.";
        let mut best = None;
        assert!(ex.consider(
            &mut best,
            CleanedCandidate::from_text(text.to_string()),
            ExtractionSource::Primary
        ));
        // identical score: keep the first
        assert!(!ex.consider(
            &mut best,
            CleanedCandidate::from_text(text.to_string()),
            ExtractionSource::Aggressive
        ));
        assert_eq!(best.as_ref().map(|b| b.source), Some(ExtractionSource::Primary));

        let longer = format!("{text}\n\nA second paragraph adds detail about the schedule and the budget.");
        assert!(ex.consider(
            &mut best,
            CleanedCandidate::from_text(longer),
            ExtractionSource::Aggressive
        ));
        assert_eq!(best.map(|b| b.source), Some(ExtractionSource::Aggressive));
    }
}
