use super::clean::normalize_whitespace;
use super::selectors::noise_selectors_for;
use super::ArticleExtractor;
use crate::core::types::{Candidate, ExtractionSource, ScoredResult};
use regex::{Regex, RegexSet};
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Two texts are treated as the same block when one contains the other's first N chars.
pub const DEDUP_PREFIX_CHARS: usize = 30;

/// Never detached by noise pruning even if a broad attribute selector hits them.
const PRUNE_PROTECTED: &[&str] = &["html", "body", "main", "article"];

/// Boilerplate whole-paragraph deny-list: bylines, contact details, addresses,
/// share prompts, copyright lines. Anchored so a story paragraph that merely
/// mentions a reporter, an email or a platform is kept.
const DENY_PATTERNS: &[&str] = &[
    r"^\s*[가-힣]{2,4}\s?(?:기자|특파원)(?:\s+[\w.+-]+@[\w-]+(?:\.[\w-]+)+)?\s*$",
    r"^\s*[\w.+-]+@[\w-]+(?:\.[\w-]+)+\s*$",
    r"^.{0,60}\d{2,4}-\d{3,4}-\d{4}.{0,20}$",
    r"^\s*(?:주소|Address)\s*[:：]",
    r"^\s*(?:서울|부산|대구|인천|광주|대전|울산|세종|경기)[가-힣]*\s+[가-힣]+(?:구|군|시)\s+[가-힣0-9]+(?:로|길)",
    r"^(?:\s*(?:기사\s*)?(?:공유하기|카카오톡|페이스북|트위터|밴드|링크\s*복사)\s*[|·/]?)+\s*$",
    r"(?i)^\s*share\s+(?:this|on)\b.{0,60}$",
    r"(?i)^\s*(?:ⓒ|©|\(c\)|copyright\b).{0,120}$",
    r"^.{0,60}(?:무단\s*전재|재배포\s*금지).{0,60}$",
    r"(?i)^.{0,80}all rights reserved\.?\s*$",
];

fn deny_list() -> Option<&'static RegexSet> {
    static DENY: OnceLock<Option<RegexSet>> = OnceLock::new();
    DENY.get_or_init(|| match RegexSet::new(DENY_PATTERNS) {
        Ok(set) => Some(set),
        Err(e) => {
            warn!("Boilerplate deny-list failed to compile: {}", e);
            None
        }
    })
    .as_ref()
}

fn sentence_splitter() -> Option<&'static Regex> {
    static SENTENCE: OnceLock<Option<Regex>> = OnceLock::new();
    SENTENCE
        .get_or_init(|| Regex::new(r"[^.!?。]+(?:[.!?。]+|$)").ok())
        .as_ref()
}

pub(super) fn is_denied(text: &str) -> bool {
    deny_list().is_some_and(|set| set.is_match(text))
}

/// True when the first `DEDUP_PREFIX_CHARS` chars of `text` already occur in `collected`.
pub(super) fn is_prefix_duplicate(text: &str, collected: &[String]) -> bool {
    let prefix: String = text.chars().take(DEDUP_PREFIX_CHARS).collect();
    collected.iter().any(|existing| existing.contains(&prefix))
}

/// All descendant text of `element`, whitespace-normalized.
pub(super) fn element_text(element: ElementRef) -> String {
    normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Inline tags that may sit between the text lines of a `<br>`-separated body.
const INLINE_TAGS: &[&str] = &[
    "br", "b", "i", "u", "em", "strong", "a", "span", "font", "small", "sup", "sub", "mark", "img",
];

/// An element whose element children are all inline, so its loose text is body text.
fn is_leaf_like(element: ElementRef) -> bool {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .all(|child| INLINE_TAGS.contains(&child.value().name()))
}

/// Each direct text child of `element`, whitespace-normalized, empty ones skipped.
fn direct_texts<'a>(element: ElementRef<'a>) -> impl Iterator<Item = String> + 'a {
    element
        .children()
        .filter_map(|child| child.value().as_text().map(|t| normalize_whitespace(&**t)))
        .filter(|t| !t.is_empty())
}

pub(super) fn element_child_count(element: ElementRef) -> usize {
    element
        .children()
        .filter(|child| child.value().is_element())
        .count()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn selector(raw: &str) -> Option<Selector> {
    match Selector::parse(raw) {
        Ok(sel) => Some(sel),
        Err(_) => {
            warn!("Skipping invalid selector '{}'", raw);
            None
        }
    }
}

/// One step of the per-element extraction cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    Paragraphs,
    Blocks,
    TextNodes,
    Sentences,
}

impl ExtractionStrategy {
    pub const CASCADE: [ExtractionStrategy; 4] = [
        ExtractionStrategy::Paragraphs,
        ExtractionStrategy::Blocks,
        ExtractionStrategy::TextNodes,
        ExtractionStrategy::Sentences,
    ];

    /// Paragraph count at which the cascade stops after running this strategy.
    pub fn enough(&self) -> usize {
        match self {
            ExtractionStrategy::Paragraphs => 5,
            ExtractionStrategy::Blocks => 3,
            ExtractionStrategy::TextNodes => 2,
            ExtractionStrategy::Sentences => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStrategy::Paragraphs => "paragraphs",
            ExtractionStrategy::Blocks => "blocks",
            ExtractionStrategy::TextNodes => "text_nodes",
            ExtractionStrategy::Sentences => "sentences",
        }
    }
}

impl ArticleExtractor {
    /// Copy of `document` with ads, navigation, widgets and publisher boilerplate detached.
    pub(super) fn prune_noise(&self, document: &Html, url: &str) -> Html {
        let mut pruned = document.clone();
        let mut doomed = Vec::new();
        for raw in noise_selectors_for(url) {
            let Some(sel) = selector(raw) else {
                continue;
            };
            doomed.extend(
                pruned
                    .root_element()
                    .select(&sel)
                    .filter(|el| !PRUNE_PROTECTED.contains(&el.value().name()))
                    .map(|el| el.id()),
            );
        }

        let removed = doomed.len();
        for id in doomed {
            if let Some(mut node) = pruned.tree.get_mut(id) {
                node.detach();
            }
        }
        debug!("Pruned {} non-content subtrees", removed);
        pruned
    }

    /// Try every selector in order, keeping the best cleaned candidate.
    pub(super) fn primary_pass(&self, document: &Html, selectors: &[&str]) -> Option<ScoredResult> {
        let mut best: Option<ScoredResult> = None;

        'selectors: for raw in selectors {
            let Some(sel) = selector(raw) else {
                continue;
            };
            for element in document.root_element().select(&sel) {
                let Some(candidate) = self.extract_candidate(element) else {
                    continue;
                };
                let cleaned = self.clean_candidate(&candidate.joined());
                if self.consider(&mut best, cleaned, ExtractionSource::Primary) {
                    debug!("Selector '{}' produced a new best candidate", raw);
                }
                if let Some(b) = best.as_ref().filter(|b| b.score > self.early_exit_score) {
                    info!(
                        "Early exit at selector '{}' with score {:.1}",
                        raw, b.score
                    );
                    break 'selectors;
                }
            }
        }

        best
    }

    /// Run the strategy cascade on one matched element.
    pub fn extract_candidate(&self, element: ElementRef) -> Option<Candidate> {
        let mut paragraphs: Vec<String> = Vec::new();
        for strategy in ExtractionStrategy::CASCADE {
            self.apply_strategy(strategy, element, &mut paragraphs);
            if paragraphs.len() >= strategy.enough() {
                debug!(
                    "Cascade stopped at {} with {} paragraphs",
                    strategy.as_str(),
                    paragraphs.len()
                );
                break;
            }
        }

        if paragraphs.is_empty() {
            None
        } else {
            Some(Candidate::new(paragraphs))
        }
    }

    fn apply_strategy(
        &self,
        strategy: ExtractionStrategy,
        element: ElementRef,
        paragraphs: &mut Vec<String>,
    ) {
        match strategy {
            ExtractionStrategy::Paragraphs => self.collect_paragraphs(element, paragraphs),
            ExtractionStrategy::Blocks => self.collect_blocks(element, paragraphs),
            ExtractionStrategy::TextNodes => self.collect_text_nodes(element, paragraphs),
            ExtractionStrategy::Sentences => {
                let regrouped = self.regroup_sentences(element);
                if !regrouped.is_empty() {
                    *paragraphs = regrouped;
                }
            }
        }
    }

    fn collect_paragraphs(&self, element: ElementRef, paragraphs: &mut Vec<String>) {
        let Some(sel) = selector("p") else {
            return;
        };
        for p in element.select(&sel) {
            let text = element_text(p);
            let len = char_len(&text);
            if (20..1000).contains(&len) && !is_denied(&text) {
                paragraphs.push(text);
            }
        }
    }

    fn collect_blocks(&self, element: ElementRef, paragraphs: &mut Vec<String>) {
        let Some(sel) = selector("div, span, section") else {
            return;
        };
        for block in element.select(&sel) {
            if element_child_count(block) > 5 {
                continue;
            }
            let text = element_text(block);
            if char_len(&text) > 30 && !is_prefix_duplicate(&text, paragraphs) {
                paragraphs.push(text);
            }
        }
    }

    fn collect_text_nodes(&self, element: ElementRef, paragraphs: &mut Vec<String>) {
        let nodes = element
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|node| is_leaf_like(*node));
        for node in nodes {
            for text in direct_texts(node) {
                if char_len(&text) > 50 && !is_prefix_duplicate(&text, paragraphs) {
                    paragraphs.push(text);
                }
            }
        }
    }

    fn regroup_sentences(&self, element: ElementRef) -> Vec<String> {
        let full = element_text(element);
        if char_len(&full) <= 200 {
            return Vec::new();
        }
        let Some(splitter) = sentence_splitter() else {
            return Vec::new();
        };

        let sentences: Vec<&str> = splitter
            .find_iter(&full)
            .map(|m| m.as_str().trim())
            .filter(|s| (30..500).contains(&char_len(s)) && !is_denied(s))
            .collect();

        sentences.chunks(2).map(|pair| pair.join(" ")).collect()
    }
}
