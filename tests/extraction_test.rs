/// End-to-end extraction over fixed HTML: no network, no cache.
use article_extract::rust_scraper::{selectors_for, ArticleExtractor, META_SUMMARY_NOTE};
use article_extract::types::ExtractionSource;

fn init_logger() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn extractor() -> ArticleExtractor {
    ArticleExtractor::default()
}

const P40: &str = "Local libraries extend weekend hours now";
const P60: &str = "The city council approved funding for three more librarians.";
const P80: &str = "Residents can now borrow books on Sundays from ten in the morning until six p.m.";

const SNOW_BODY: &str = "The national weather service issued a heavy snow warning for the northern \
provinces on Friday. Forecasters expect up to forty centimetres of snow by Sunday morning. Schools \
in the affected areas will close early, and officials urged drivers to avoid mountain roads.";

const HARBOUR_SUMMARY: &str = "Officials announced a sweeping plan to rebuild the harbour district, \
promising new housing, wider promenades and a ferry link to the islands by 2028.";

fn wire_story_html() -> String {
    r#"<html><head>
        <title>정부, 내년 예산안 발표</title>
        <meta property="og:description" content="정부가 내년도 예산안을 발표했다.">
        <script>window.__ads = [1, 2, 3];</script>
    </head><body>
        <div class="gnb">뉴스 홈 정치 경제 사회 생활 세계</div>
        <div class="media_end_head_journalist">홍길동 기자</div>
        <div id="dic_area">
            (서울=연합뉴스) 홍길동 기자 = 정부는 내년도 예산안을 오늘 국무회의에서 의결했다고 밝혔다.<br><br>
            예산안의 총지출 규모는 올해보다 약 삼 퍼센트 늘어난 수준으로 편성됐다고 기획재정부가 설명했다.<br><br>
            복지와 일자리 분야 예산이 가장 크게 늘었으며 연구개발 예산도 다시 증가세로 돌아섰다.<br><br>
            정부는 재정 건전성을 유지하면서도 민생 회복을 뒷받침하는 데 중점을 뒀다고 강조했다.<br><br>
            예산안은 다음 달 국회에 제출되며 연말까지 심사를 거쳐 확정될 예정이다.<br><br>
            hong@yna.co.kr
        </div>
        <div class="copyright">ⓒ 연합뉴스, 무단 전재-재배포, AI 학습 및 활용 금지</div>
        <div class="comment_area">댓글 12 좋아요 40</div>
    </body></html>"#
        .to_string()
}

fn three_paragraph_html() -> String {
    format!(
        "<html><head><title>Libraries</title></head><body><p>{P40}</p><p>{P60}</p><p>{P80}</p></body></html>"
    )
}

const PORT_STORY: [&str; 6] = [
    "Dock workers at the northern port ended their strike early on Tuesday morning.",
    "The union said members had accepted a revised offer covering pay and overtime.",
    "Shipping companies warned that clearing the backlog could take several weeks.",
    "More than forty container vessels were anchored offshore during the stoppage.",
    "Retailers reported shortages of imported electronics and seasonal clothing.",
    "Port authorities plan to extend operating hours until the queue is cleared.",
];

fn multi_container_html() -> String {
    let article: String = PORT_STORY.iter().map(|p| format!("<p>{p}</p>")).collect();
    format!(
        r#"<html><body>
            <div id="content"><p>A teaser paragraph that only summarises the main story.</p></div>
            <article>{article}</article>
            <div class="article-body"><p>Short duplicate container with a single paragraph of text.</p></div>
        </body></html>"#
    )
}

#[test]
fn same_html_gives_same_result() {
    init_logger();
    let html = wire_story_html();
    let url = "https://n.news.naver.com/mnews/article/001/0014000000";
    let first = extractor().extract(&html, url);
    for _ in 0..3 {
        assert_eq!(extractor().extract(&html, url), first);
    }
}

#[test]
fn wire_story_is_stripped_of_boilerplate() {
    init_logger();
    let result = extractor().extract(
        &wire_story_html(),
        "https://n.news.naver.com/mnews/article/001/0014000000",
    );
    assert!(matches!(
        result.source,
        ExtractionSource::Primary | ExtractionSource::Aggressive
    ));
    assert!(result.text.contains("기획재정부가 설명했다"));
    assert!(!result.text.contains("hong@yna.co.kr"));
    assert!(!result.text.contains("무단"));
    assert!(!result.text.contains("댓글"));
    assert!(!result.text.contains("뉴스 홈"));
    assert!(!result.text.contains("__ads"));
}

#[test]
fn three_short_paragraphs_are_joined_without_fallback() {
    init_logger();
    assert_eq!(P40.chars().count(), 40);
    assert_eq!(P60.chars().count(), 60);
    assert_eq!(P80.chars().count(), 80);

    let result = extractor().extract(&three_paragraph_html(), "https://www.example.com/news/libraries");
    assert_eq!(result.text, format!("{P40}\n\n{P60}\n\n{P80}"));
    assert_eq!(result.source, ExtractionSource::Primary);
}

#[test]
fn og_description_alone_yields_summary_with_note() {
    init_logger();
    assert!(HARBOUR_SUMMARY.chars().count() > 100);
    let html = format!(
        r#"<html><head><meta property="og:description" content="{HARBOUR_SUMMARY}"></head><body><div></div></body></html>"#
    );
    let result = extractor().extract(&html, "https://news.example.org/harbour");
    assert_eq!(result.source, ExtractionSource::Meta);
    assert_eq!(result.text, format!("{HARBOUR_SUMMARY}\n\n{META_SUMMARY_NOTE}"));
}

#[test]
fn json_ld_body_beats_meta_description() {
    init_logger();
    assert!(SNOW_BODY.chars().count() >= 250);
    let json_ld = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "NewsArticle",
        "headline": "Heavy snow warning",
        "articleBody": SNOW_BODY,
    });
    let html = format!(
        r#"<html><head>
            <script type="application/ld+json">{json_ld}</script>
            <meta name="description" content="{HARBOUR_SUMMARY}">
        </head><body><nav>Home</nav></body></html>"#
    );
    let result = extractor().extract(&html, "https://weather.example.net/warnings/1");
    assert_eq!(result.source, ExtractionSource::JsonLd);
    assert_eq!(result.text, SNOW_BODY);
}

#[test]
fn reversing_selector_order_never_lowers_the_score() {
    init_logger();
    let html = multi_container_html();
    let url = "https://port.example.com/story";
    let forward = selectors_for(url);
    let mut reverse = forward.clone();
    reverse.reverse();

    let a = extractor().extract_with_selectors(&html, url, &forward);
    let b = extractor().extract_with_selectors(&html, url, &reverse);
    assert!(b.score >= a.score);
    assert!(a.text.contains(PORT_STORY[5]));
}

#[test]
fn successful_results_respect_length_floor() {
    init_logger();
    let fixtures = [
        (wire_story_html(), "https://n.news.naver.com/mnews/article/001/1"),
        (three_paragraph_html(), "https://example.com/a"),
        (multi_container_html(), "https://example.com/b"),
        ("<html><body><p>Tiny.</p></body></html>".to_string(), "https://example.com/c"),
        ("<html><body></body></html>".to_string(), "https://example.com/d"),
    ];

    let mut fallbacks = 0;
    for (html, url) in &fixtures {
        let result = extractor().extract(html, url);
        if result.source == ExtractionSource::FinalFallback {
            fallbacks += 1;
            assert!(result.text.contains("example.com"));
            continue;
        }
        assert!(result.text.chars().count() >= 50, "{url}: {}", result.text);
        assert!(result.text.split("\n\n").any(|p| !p.trim().is_empty()));
    }
    assert_eq!(fallbacks, 2);
}
