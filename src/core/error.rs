use std::time::Duration;
use thiserror::Error;

/// Problems with the caller-supplied article URL. These are the only
/// failures surfaced as a 4xx.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("missing required query parameter 'url'")]
    Missing,

    #[error("invalid article url '{url}': {reason}")]
    Malformed { url: String, reason: String },

    #[error("unsupported url scheme '{0}': only http and https are accepted")]
    UnsupportedScheme(String),
}

/// Failures while retrieving the raw HTML. Never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("fetch cancelled")]
    Cancelled,

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Parse a caller-supplied article URL, accepting only http(s).
pub fn parse_article_url(raw: Option<&str>) -> Result<url::Url, InputError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err(InputError::Missing);
    };

    let parsed = url::Url::parse(raw).map_err(|e| InputError::Malformed {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(InputError::UnsupportedScheme(other.to_string())),
    }

    if parsed.host_str().map(str::is_empty).unwrap_or(true) {
        return Err(InputError::Malformed {
            url: raw.to_string(),
            reason: "url has no host".to_string(),
        });
    }

    Ok(parsed)
}
