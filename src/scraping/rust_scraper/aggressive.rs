use super::parse::{element_child_count, element_text, is_prefix_duplicate};
use super::ArticleExtractor;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use whatlang::Script;

const MINER_SELECTOR: &str = "p, div, span, section, article";

/// Below this many mined paragraphs the universal scan runs as well.
const MIN_MINED_PARAGRAPHS: usize = 5;

/// Tags the universal scan never looks at.
const UNIVERSAL_SKIP: &[&str] = &[
    "html", "head", "body", "script", "style", "noscript", "title", "meta", "link",
];

/// Inclusive char-length bounds per tag for the targeted scan.
fn tag_bounds(tag: &str) -> Option<(usize, usize)> {
    match tag {
        "p" => Some((11, usize::MAX)),
        "div" => Some((20, 2000)),
        "span" => Some((30, 1500)),
        "section" | "article" => Some((50, 3000)),
        _ => None,
    }
}

fn script_class(script: Script) -> Option<&'static str> {
    let class = match script {
        Script::Hangul => r"\p{Hangul}",
        Script::Latin => r"\p{Latin}",
        Script::Cyrillic => r"\p{Cyrillic}",
        Script::Mandarin => r"\p{Han}",
        Script::Hiragana | Script::Katakana => r"[\p{Hiragana}\p{Katakana}\p{Han}]",
        Script::Arabic => r"\p{Arabic}",
        Script::Greek => r"\p{Greek}",
        Script::Hebrew => r"\p{Hebrew}",
        Script::Thai => r"\p{Thai}",
        Script::Devanagari => r"\p{Devanagari}",
        _ => return None,
    };
    Some(class)
}

/// Language-presence check: text must contain at least one char of the page's dominant script.
pub struct NativeScript {
    pattern: Option<Regex>,
}

impl NativeScript {
    /// Detect the dominant script of `sample`; unknown scripts accept any alphabetic char.
    pub fn detect(sample: &str) -> Self {
        let script = whatlang::detect_script(sample);
        let pattern = script
            .and_then(script_class)
            .and_then(|class| Regex::new(class).ok());
        debug!("Native script for aggressive scan: {:?}", script);
        Self { pattern }
    }

    pub fn present_in(&self, text: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(text),
            None => text.chars().any(char::is_alphabetic),
        }
    }
}

impl ArticleExtractor {
    /// Selector-agnostic scan of the whole (pruned) document.
    pub(super) fn mine_aggressively(&self, document: &Html) -> Vec<String> {
        let sample: String = document
            .root_element()
            .text()
            .flat_map(str::chars)
            .take(4000)
            .collect();
        let native = NativeScript::detect(&sample);

        let mut mined = Vec::new();
        if let Ok(sel) = Selector::parse(MINER_SELECTOR) {
            for element in document.root_element().select(&sel) {
                let Some((min, max)) = tag_bounds(element.value().name()) else {
                    continue;
                };
                self.mine_element(element, (min, max), &native, &mut mined);
            }
        }

        if mined.len() < MIN_MINED_PARAGRAPHS {
            debug!(
                "Targeted scan found {} paragraphs, widening to universal scan",
                mined.len()
            );
            if let Ok(sel) = Selector::parse("*") {
                for element in document.root_element().select(&sel) {
                    if UNIVERSAL_SKIP.contains(&element.value().name())
                        || element_child_count(element) > 3
                    {
                        continue;
                    }
                    self.mine_element(element, (100, 1000), &native, &mut mined);
                }
            }
        }

        debug!("Aggressive scan mined {} paragraphs", mined.len());
        mined
    }

    fn mine_element(
        &self,
        element: ElementRef,
        (min, max): (usize, usize),
        native: &NativeScript,
        mined: &mut Vec<String>,
    ) {
        let text = element_text(element);
        let len = text.chars().count();
        if len < min || len > max {
            return;
        }
        if !native.present_in(&text) || is_prefix_duplicate(&text, mined) {
            return;
        }
        mined.push(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine(html: &str) -> Vec<String> {
        ArticleExtractor::new(500.0).mine_aggressively(&Html::parse_document(html))
    }

    #[test]
    fn per_tag_bounds_apply() {
        let html = r#"<html><body>
            <p>Eleven char</p>
            <p>ten chars!</p>
            <span>A span that is well over thirty characters long.</span>
            <span>Short span text here.</span>
        </body></html>"#;
        let mined = mine(html);
        assert!(mined.contains(&"Eleven char".to_string()));
        assert!(!mined.contains(&"ten chars!".to_string()));
        assert!(mined.contains(&"A span that is well over thirty characters long.".to_string()));
        assert!(!mined.iter().any(|m| m == "Short span text here."));
    }

    #[test]
    fn wrapper_text_shadows_nested_paragraphs() {
        let html = r#"<html><body><div>
            <p>First paragraph of a story about the harbour redevelopment plan.</p>
            <p>Second paragraph with reactions from residents and local shop owners.</p>
        </div></body></html>"#;
        let mined = mine(html);
        assert_eq!(mined.len(), 1);
        assert!(mined[0].starts_with("First paragraph"));
        assert!(mined[0].ends_with("shop owners."));
    }

    #[test]
    fn foreign_script_text_is_ignored() {
        let html = r#"<html><body>
            <p>서울시는 올해 대중교통 요금을 동결하기로 결정했다고 밝혔다.</p>
            <p>시민 단체들은 이번 결정을 환영한다는 입장을 내놓았다.</p>
            <p>버스 노선 개편안은 다음 달 공청회를 거쳐 확정될 예정이다.</p>
            <p>12345 67890 12345</p>
        </body></html>"#;
        let mined = mine(html);
        assert_eq!(mined.len(), 3);
        assert!(!mined.iter().any(|m| m.starts_with("12345")));
    }

    #[test]
    fn universal_scan_picks_up_unusual_tags() {
        let body = "A long body placed inside a table cell, which the targeted scan \
                    never looks at, but which still carries the actual article text.";
        let html = format!(
            r#"<html><body><table><tr><td>{body}</td></tr></table></body></html>"#
        );
        let mined = mine(&html);
        assert_eq!(mined, vec![body.split_whitespace().collect::<Vec<_>>().join(" ")]);
    }

    #[test]
    fn unknown_script_falls_back_to_alphabetic() {
        let check = NativeScript { pattern: None };
        assert!(check.present_in("ok"));
        assert!(!check.present_in("123 !!"));
    }
}
