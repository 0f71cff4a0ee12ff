use super::ArticleExtractor;
use crate::core::types::CleanedCandidate;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Paragraphs shorter than this (in chars) are dropped after pattern removal.
pub const MIN_PARAGRAPH_CHARS: usize = 20;

/// Paragraph B is dropped when its word-set similarity to a kept paragraph exceeds this.
pub const DUPLICATE_SIMILARITY: f64 = 0.8;

/// Ordered boilerplate removals. Order matters: reporter tags go before bare
/// emails, copyright lines before the bracket sweep that cleans up after them.
const BOILERPLATE_PATTERNS: &[&str] = &[
    // reporter tags and bylines
    r"\([가-힣A-Za-z]+\s*=\s*[가-힣A-Za-z\s]+\)\s*",
    r"\[[가-힣A-Za-z\s]*기자\]",
    r"[가-힣]{2,4}\s?(?:기자|특파원|논설위원)\s*=\s*",
    r"[가-힣]{2,4}\s?(?:기자|특파원)\s+[\w.+-]+@[\w-]+(?:\.[\w-]+)+",
    r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+",
    r"(?i)\bby\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2}\s*\|\s*",
    // photo / video credits
    r"\((?:사진|영상|그래픽|자료|사진제공)\s*[=:]?\s*[^)]{0,40}\)",
    r"\[(?:사진|영상|그래픽)[^\]]{0,40}\]",
    r"(?i)\((?:photo|video|image|graphic)s?\s*(?:by|credit|:)?[^)]{0,60}\)",
    r"(?i)(?:photo|image)\s+credit\s*:?[^\n]{0,80}",
    // copyright and AI-training notices
    r"(?i)(?:ⓒ|©|\(c\)|copyright\b)[^\n]{0,100}",
    r"무단\s*전재[^\n]{0,60}",
    r"재배포\s*금지",
    r"(?i)AI\s*학습\s*(?:및\s*활용\s*)?(?:이용\s*)?금지",
    r"(?i)all rights reserved\.?",
    // timestamps and publication metadata
    r"(?:기사입력|최종수정|입력|수정|업데이트|등록)\s*[:：]?\s*\d{4}\s*[.\-/년]\s*\d{1,2}\s*[.\-/월]\s*\d{1,2}\s*[.일]?(?:\s*(?:오전|오후)?\s*\d{1,2}:\d{2}(?::\d{2})?)?",
    r"(?i)\b(?:published|updated|posted|last modified)\s*(?:on|at)?\s*:?\s*(?:\d{4}[.\-/]\d{1,2}[.\-/]\d{1,2}|[a-z]{3,9}\.?\s+\d{1,2},?\s+\d{4})(?:,?\s+\d{1,2}:\d{2}(?:\s*[ap]\.?m\.?)?(?:\s+[a-z]{2,4})?)?",
    // share prompts
    r"(?:기사\s*)?공유하기",
    r"(?:페이스북|트위터|카카오톡|카카오스토리|네이버\s*블로그|밴드|링크)\s*(?:공유|보내기|복사)",
    r"(?i)\bshare\s+(?:this\s+(?:article|story|page)|on\s+(?:facebook|twitter|x|linkedin|whatsapp|email))\b",
    r"(?i)\b(?:tweet|email)\s+this\b",
    // view / like / comment counters
    r"(?:조회수?|좋아요|댓글|공감|추천수)\s*[:：]?\s*\d[\d,]*\s*(?:회|개|건)?",
    r"(?i)\b\d[\d,.]*\s*[km]?\s+(?:views|likes|comments|shares)\b",
    // recommended-keyword blocks
    r"(?:추천|관련|인기)\s*(?:키워드|검색어|태그)\s*[:：]?[^\n]*",
    r"(?i)\brelated\s+(?:topics|keywords|tags)\s*:?[^\n]*",
    r"#[\p{L}\p{N}_]+(?:\s+#[\p{L}\p{N}_]+)+",
    // empty bracket remnants
    r"\(\s*\)|\[\s*\]|<\s*>|【\s*】|「\s*」|『\s*』",
    // runs of decorative punctuation
    r"[=\-_*~#·▶►■□◆◇▲△●○★☆]{3,}",
];

fn boilerplate_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        BOILERPLATE_PATTERNS
            .iter()
            .filter_map(|p| match Regex::new(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!("Skipping invalid boilerplate pattern {}: {}", p, e);
                    None
                }
            })
            .collect()
    })
}

fn paragraph_break() -> Option<&'static Regex> {
    static BREAK: OnceLock<Option<Regex>> = OnceLock::new();
    BREAK.get_or_init(|| Regex::new(r"\n\s*\n").ok()).as_ref()
}

pub(super) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|w| w.to_lowercase()).collect()
}

/// |A ∩ B| / |A ∪ B| over lowercased whitespace-separated words.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let a = word_set(a);
    let b = word_set(b);
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

/// Keep paragraphs in order, dropping any that is a near-duplicate of one already kept.
pub fn dedupe_paragraphs(paragraphs: Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(paragraphs.len());
    for paragraph in paragraphs {
        let duplicate = kept
            .iter()
            .any(|existing| jaccard_similarity(existing, &paragraph) > DUPLICATE_SIMILARITY);
        if !duplicate {
            kept.push(paragraph);
        }
    }
    kept
}

/// Strip boilerplate from candidate text and normalize paragraph spacing.
///
/// Output paragraphs are separated by exactly one blank line, each at least
/// `MIN_PARAGRAPH_CHARS` long, with near-duplicates removed.
pub fn clean_text(text: &str) -> String {
    let mut stripped = text.to_string();
    for re in boilerplate_patterns() {
        stripped = re.replace_all(&stripped, "").into_owned();
    }

    let pieces: Vec<&str> = match paragraph_break() {
        Some(re) => re.split(&stripped).collect(),
        None => stripped.split("\n\n").collect(),
    };

    let paragraphs: Vec<String> = pieces
        .into_iter()
        .map(normalize_whitespace)
        .filter(|p| p.chars().count() >= MIN_PARAGRAPH_CHARS)
        .collect();

    dedupe_paragraphs(paragraphs).join("\n\n")
}

impl ArticleExtractor {
    pub(super) fn clean_candidate(&self, text: &str) -> CleanedCandidate {
        CleanedCandidate::from_text(clean_text(text))
    }
}
