//! Static hostname → selector tables.
//!
//! Publisher rows are matched by substring against the normalized hostname;
//! the first matching row wins. The generic defaults always follow the
//! publisher-specific list so broad strategies still run as a safety net.

use url::Url;

/// One row of a hostname-keyed selector table.
#[derive(Debug, Clone, Copy)]
pub struct SelectorSet {
    pub hostname_pattern: &'static str,
    pub selectors: &'static [&'static str],
}

/// Article body containers per publisher, in priority order.
pub static PUBLISHER_SELECTORS: &[SelectorSet] = &[
    SelectorSet {
        hostname_pattern: "naver.com",
        selectors: &["#dic_area", "#newsct_article", "#articleBodyContents", "#articeBody"],
    },
    SelectorSet {
        hostname_pattern: "daum.net",
        selectors: &["div.article_view section", "div.article_view", "#harmonyContainer"],
    },
    SelectorSet {
        hostname_pattern: "chosun.com",
        selectors: &["section.article-body", "div.article-body", "#fusion-app article"],
    },
    SelectorSet {
        hostname_pattern: "joongang.co.kr",
        selectors: &["#article_body", "div.article_body", "div.article_content"],
    },
    SelectorSet {
        hostname_pattern: "donga.com",
        selectors: &["section.news_view", "div.article_txt", "#article_txt"],
    },
    SelectorSet {
        hostname_pattern: "hani.co.kr",
        selectors: &["div.article-text", "div.text", "#contents-article"],
    },
    SelectorSet {
        hostname_pattern: "khan.co.kr",
        selectors: &["#articleBody", "div.art_body", "div.article_txt"],
    },
    SelectorSet {
        hostname_pattern: "yna.co.kr",
        selectors: &["div.story-news.article", "article.story-news", "#articleWrap"],
    },
    SelectorSet {
        hostname_pattern: "hankyung.com",
        selectors: &["#articletxt", "div.article-body", "div.article-body-wrap"],
    },
    SelectorSet {
        hostname_pattern: "mk.co.kr",
        selectors: &["div.news_cnt_detail_wrap", "#article_body", "div.art_txt"],
    },
    SelectorSet {
        hostname_pattern: "hankookilbo.com",
        selectors: &["div.col-main", "div.article-story", "p.editor-p"],
    },
    SelectorSet {
        hostname_pattern: "seoul.co.kr",
        selectors: &["#articleContent", "div.viewContent"],
    },
    SelectorSet {
        hostname_pattern: "sbs.co.kr",
        selectors: &["div.text_area", "div.main_text", "div.article_cont_area"],
    },
    SelectorSet {
        hostname_pattern: "kbs.co.kr",
        selectors: &["#cont_newstext", "div.detail-body", "div.view-text"],
    },
    SelectorSet {
        hostname_pattern: "imbc.com",
        selectors: &["div.news_txt", "div.news_cont"],
    },
    SelectorSet {
        hostname_pattern: "ytn.co.kr",
        selectors: &["div.paragraph", "#CmAdContent", "div.article"],
    },
    SelectorSet {
        hostname_pattern: "news1.kr",
        selectors: &["#articles_detail", "div.detail", "div#articleBody"],
    },
    SelectorSet {
        hostname_pattern: "newsis.com",
        selectors: &["div.viewer", "article#textBody", "div.article_view"],
    },
    SelectorSet {
        hostname_pattern: "edaily.co.kr",
        selectors: &["div.news_body", "#newsContent"],
    },
    SelectorSet {
        hostname_pattern: "bbc.",
        selectors: &["article [data-component=text-block]", "article", "#main-content"],
    },
    SelectorSet {
        hostname_pattern: "nytimes.com",
        selectors: &["section[name=articleBody]", "div.StoryBodyCompanionColumn"],
    },
    SelectorSet {
        hostname_pattern: "theguardian.com",
        selectors: &["div.article-body-commercial-selector", "#maincontent", "div.content__article-body"],
    },
    SelectorSet {
        hostname_pattern: "cnn.com",
        selectors: &["div.article__content", "div.zn-body__paragraph", "section.body-text"],
    },
    SelectorSet {
        hostname_pattern: "reuters.com",
        selectors: &["div[class*=article-body]", "article"],
    },
];

/// Generic containers tried for every page, most specific first.
pub static DEFAULT_SELECTORS: &[&str] = &[
    "[itemprop=articleBody]",
    "#articleBody",
    "#article-body",
    "#article_body",
    "#articleContent",
    "#article_content",
    "#articletxt",
    "#newsContent",
    "#news_body_area",
    "#newsViewArea",
    ".article-body",
    ".article_body",
    ".articleBody",
    ".article-content",
    ".article_content",
    ".article-text",
    ".article_txt",
    ".article_view",
    ".news-content",
    ".news_content",
    ".news_body",
    ".news_view",
    ".news_text",
    ".view_con",
    ".view_content",
    ".view-content",
    ".story-body",
    ".story-content",
    ".entry-content",
    ".post-content",
    ".post-body",
    "#content article",
    "article",
    "main",
    "[role=main]",
    "#content",
    ".content",
    "#container",
    "body",
];

/// Subtrees that never carry article text.
pub static NOISE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    "template",
    "iframe",
    "svg",
    "canvas",
    "form",
    "button",
    "nav",
    "header",
    "footer",
    "aside",
    "figcaption",
    "[aria-hidden=true]",
    // advertising
    ".ad",
    ".ads",
    ".advert",
    ".advertisement",
    "[class*=advert]",
    "[id*=advert]",
    "[class*=adsbygoogle]",
    "[id^=google_ads]",
    "[id^=div-gpt-ad]",
    "[class^=ad-]",
    "[class*=-ad-]",
    "[class*=ad_wrap]",
    "[class*=banner]",
    "[id*=banner]",
    // navigation
    ".gnb",
    ".lnb",
    ".navigation",
    ".breadcrumb",
    ".pagination",
    ".menu",
    // comments
    "#comments",
    "[class*=comment]",
    "[id*=comment]",
    // share widgets
    "[class*=share]",
    "[class*=sns]",
    "[class*=social]",
    // related / recommended
    "[class*=related]",
    "[class*=relation]",
    "[class*=recommend]",
    "[class*=popular]",
    "[class*=most-read]",
    // cookie / consent
    "[class*=cookie]",
    "[id*=cookie]",
    "[class*=consent]",
    "[id*=consent]",
    "[class*=subscribe]",
    "[class*=newsletter]",
];

/// Publisher-specific boilerplate subtrees removed on top of `NOISE_SELECTORS`.
pub static PUBLISHER_NOISE: &[SelectorSet] = &[
    SelectorSet {
        hostname_pattern: "naver.com",
        selectors: &[
            ".media_end_head_journalist",
            ".media_end_head_info",
            ".byline",
            ".reporter_area",
            ".promotion",
            ".copyright",
            "#spiLayer",
            ".media_end_linked",
            ".end_photo_org em.img_desc",
        ],
    },
    SelectorSet {
        hostname_pattern: "chosun.com",
        selectors: &[
            ".article-byline",
            ".article-dateline",
            ".subscribe-box",
            ".arcad",
            "#arcad",
            ".article-photo-caption",
            ".dfpAd",
        ],
    },
    SelectorSet {
        hostname_pattern: "joongang.co.kr",
        selectors: &[
            ".ab_byline",
            ".ab_related_article",
            ".ab_subtitle",
            ".ab_photo .caption",
            ".journalist_area",
            ".byline",
            ".ab_tag",
        ],
    },
];

/// Lowercased host without a leading `www.`; `None` when `url` does not parse.
pub fn normalize_hostname(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

fn matching_row(table: &'static [SelectorSet], host: &str) -> Option<&'static SelectorSet> {
    table.iter().find(|row| host.contains(row.hostname_pattern))
}

/// Ordered selectors for `url`: publisher list (if any) followed by the defaults.
///
/// Malformed URLs yield the default list only.
pub fn selectors_for(url: &str) -> Vec<&'static str> {
    let mut out = Vec::with_capacity(DEFAULT_SELECTORS.len() + 4);
    if let Some(row) = normalize_hostname(url).and_then(|h| matching_row(PUBLISHER_SELECTORS, &h)) {
        out.extend_from_slice(row.selectors);
    }
    for sel in DEFAULT_SELECTORS {
        if !out.contains(sel) {
            out.push(sel);
        }
    }
    out
}

/// Non-content subtree selectors for `url`: generic list plus any publisher extras.
pub fn noise_selectors_for(url: &str) -> Vec<&'static str> {
    let mut out = NOISE_SELECTORS.to_vec();
    if let Some(row) = normalize_hostname(url).and_then(|h| matching_row(PUBLISHER_NOISE, &h)) {
        out.extend_from_slice(row.selectors);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_www_and_lowercases() {
        assert_eq!(
            normalize_hostname("https://WWW.Chosun.com/national/2026/"),
            Some("chosun.com".to_string())
        );
        assert_eq!(normalize_hostname("::nope::"), None);
    }

    #[test]
    fn publisher_selectors_precede_defaults() {
        let sels = selectors_for("https://n.news.naver.com/mnews/article/001/0014");
        assert_eq!(sels[0], "#dic_area");
        assert!(sels.ends_with(&["body"]));
        let dic = sels.iter().position(|s| *s == "#dic_area").unwrap();
        let article = sels.iter().position(|s| *s == "article").unwrap();
        assert!(dic < article);
    }

    #[test]
    fn unknown_host_gets_defaults_only() {
        assert_eq!(selectors_for("https://blog.example.org/post"), DEFAULT_SELECTORS.to_vec());
    }

    #[test]
    fn malformed_url_gets_defaults_only() {
        assert_eq!(selectors_for("not a url at all"), DEFAULT_SELECTORS.to_vec());
    }

    #[test]
    fn shared_selectors_are_not_repeated() {
        // khan.co.kr lists #articleBody which is also a default
        let sels = selectors_for("https://www.khan.co.kr/article/1");
        assert_eq!(sels.iter().filter(|s| **s == "#articleBody").count(), 1);
        assert_eq!(sels[0], "#articleBody");
    }

    #[test]
    fn first_matching_row_wins() {
        // "sports.chosun.com" contains "chosun.com"
        let sels = selectors_for("https://sports.chosun.com/news/1");
        assert_eq!(sels[0], "section.article-body");
    }

    #[test]
    fn publisher_noise_is_appended() {
        let generic = noise_selectors_for("https://example.com/a");
        assert_eq!(generic.len(), NOISE_SELECTORS.len());
        let joongang = noise_selectors_for("https://www.joongang.co.kr/article/1");
        assert!(joongang.contains(&".ab_byline"));
        assert!(joongang.len() > generic.len());
    }

    #[test]
    fn every_table_selector_parses() {
        let all = PUBLISHER_SELECTORS
            .iter()
            .chain(PUBLISHER_NOISE.iter())
            .flat_map(|row| row.selectors.iter())
            .chain(DEFAULT_SELECTORS.iter())
            .chain(NOISE_SELECTORS.iter());
        for sel in all {
            assert!(scraper::Selector::parse(sel).is_ok(), "bad selector {sel}");
        }
    }
}
