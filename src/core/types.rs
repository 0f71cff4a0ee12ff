use serde::{Deserialize, Serialize};

/// Query string of `GET /article-content`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ArticleContentQuery {
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of every `200` answer from `/article-content`.
///
/// `error` is only present when the page could not be fetched; `content` then
/// carries a readable explanation so the UI always has something to render.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ArticleContentResponse {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ArticleContentResponse {
    pub fn ok(content: String) -> Self {
        Self {
            content,
            error: None,
        }
    }

    pub fn degraded(content: String, error: String) -> Self {
        Self {
            content,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Where the final text of an extraction came from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionSource {
    Primary,
    Aggressive,
    JsonLd,
    Meta,
    FinalFallback,
}

impl ExtractionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionSource::Primary => "primary",
            ExtractionSource::Aggressive => "aggressive",
            ExtractionSource::JsonLd => "json_ld",
            ExtractionSource::Meta => "meta",
            ExtractionSource::FinalFallback => "final_fallback",
        }
    }
}

/// Raw paragraphs pulled out of one matched element, before cleaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub paragraphs: Vec<String>,
    pub raw_length: usize,
}

impl Candidate {
    pub fn new(paragraphs: Vec<String>) -> Self {
        let raw_length = paragraphs.iter().map(|p| p.chars().count()).sum();
        Self {
            paragraphs,
            raw_length,
        }
    }

    pub fn joined(&self) -> String {
        self.paragraphs.join("\n\n")
    }
}

/// Candidate text after boilerplate removal and deduplication.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedCandidate {
    pub text: String,
    pub paragraph_count: usize,
    pub word_count: usize,
    pub avg_paragraph_length: f64,
}

impl CleanedCandidate {
    /// Derive the counters from already cleaned text (paragraphs separated by a blank line).
    pub fn from_text(text: String) -> Self {
        let paragraph_count = text
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .count();
        let word_count = text.split_whitespace().count();
        let char_length = text.chars().count();
        let avg_paragraph_length = if paragraph_count == 0 {
            0.0
        } else {
            char_length as f64 / paragraph_count as f64
        };
        Self {
            text,
            paragraph_count,
            word_count,
            avg_paragraph_length,
        }
    }

    pub fn char_length(&self) -> usize {
        self.text.chars().count()
    }
}

/// The single best result kept while an extraction runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    pub text: String,
    pub score: f64,
    pub source: ExtractionSource,
}

impl ScoredResult {
    pub fn char_length(&self) -> usize {
        self.text.chars().count()
    }
}
