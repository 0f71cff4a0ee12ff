use super::clean::clean_text;
use super::ArticleExtractor;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::debug;

/// Cleaned JSON-LD bodies must be longer than this (chars) to be used.
pub const MIN_JSON_LD_CHARS: usize = 200;

/// `description` is only considered when longer than this (chars).
const MIN_DESCRIPTION_CHARS: usize = 100;

fn has_news_article_type(map: &Map<String, Value>) -> bool {
    match map.get("@type") {
        Some(Value::String(t)) => t == "NewsArticle",
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some("NewsArticle")),
        _ => false,
    }
}

fn non_empty_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Body text of one JSON-LD object: `articleBody`, else a long `description`,
/// else `text` on a `NewsArticle`.
fn object_body(map: &Map<String, Value>) -> Option<&str> {
    if let Some(body) = non_empty_str(map, "articleBody") {
        return Some(body);
    }
    if let Some(desc) = non_empty_str(map, "description") {
        if desc.chars().count() > MIN_DESCRIPTION_CHARS {
            return Some(desc);
        }
    }
    if has_news_article_type(map) {
        return non_empty_str(map, "text");
    }
    None
}

fn collect_bodies<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_bodies(item, out);
            }
        }
        Value::Object(map) => {
            if let Some(body) = object_body(map) {
                out.push(body);
            }
            if let Some(graph) = map.get("@graph") {
                collect_bodies(graph, out);
            }
        }
        _ => {}
    }
}

impl ArticleExtractor {
    /// First JSON-LD body on the page whose cleaned text is long enough.
    ///
    /// Must be given the unpruned document: noise pruning drops `<script>`.
    pub(super) fn extract_json_ld_body(&self, document: &Html) -> Option<String> {
        let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;

        for script in document.select(&selector) {
            let raw = script.text().collect::<String>();
            if raw.trim().is_empty() {
                continue;
            }
            let value = match serde_json::from_str::<Value>(raw.trim()) {
                Ok(v) => v,
                Err(e) => {
                    debug!("Skipping malformed JSON-LD block: {}", e);
                    continue;
                }
            };

            let mut bodies = Vec::new();
            collect_bodies(&value, &mut bodies);
            for body in bodies {
                let cleaned = clean_text(body);
                if cleaned.chars().count() > MIN_JSON_LD_CHARS {
                    return Some(cleaned);
                }
            }
        }

        None
    }
}
