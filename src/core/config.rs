use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ExtractorConfig: file-based config loader (article-extract.json) with env-var fallback
// ---------------------------------------------------------------------------

pub const ENV_CONFIG_PATH: &str = "ARTICLE_EXTRACT_CONFIG";
pub const ENV_FETCH_TIMEOUT: &str = "FETCH_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT: &str = "HTTP_CONNECT_TIMEOUT_SECS";
pub const ENV_CACHE_TTL: &str = "CONTENT_CACHE_TTL_SECS";
pub const ENV_CACHE_CAPACITY: &str = "CONTENT_CACHE_CAPACITY";
pub const ENV_EARLY_EXIT_SCORE: &str = "EARLY_EXIT_SCORE";

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 30;
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_EARLY_EXIT_SCORE: f64 = 500.0;
pub const DEFAULT_PORT: u16 = 5000;

/// Top-level config loaded from `article-extract.json`.
///
/// Every field is optional; `resolve_*` falls back to the matching env var and
/// then to the built-in default.
#[derive(serde::Deserialize, Default, Clone, Debug)]
pub struct ExtractorConfig {
    /// Hard limit for a single page fetch. Default: 15.
    pub fetch_timeout_secs: Option<u64>,
    /// TCP/TLS connect limit, must not exceed the fetch timeout. Default: 10.
    pub connect_timeout_secs: Option<u64>,
    /// Content cache time-to-live. Default: 1800 (30 minutes).
    pub cache_ttl_secs: Option<u64>,
    /// Upper bound on cached URLs. Default: 10000.
    pub cache_max_capacity: Option<u64>,
    /// Stop trying selectors once the best score exceeds this. Default: 500.
    pub early_exit_score: Option<f64>,
    /// HTTP listen port. Default: 5000.
    pub port: Option<u16>,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

impl ExtractorConfig {
    /// Fetch timeout: JSON field → `FETCH_TIMEOUT_SECS` → 15s.
    pub fn resolve_fetch_timeout(&self) -> Duration {
        let secs = self
            .fetch_timeout_secs
            .or_else(|| env_parse(ENV_FETCH_TIMEOUT))
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
        Duration::from_secs(secs.max(1))
    }

    /// Connect timeout: JSON field → `HTTP_CONNECT_TIMEOUT_SECS` → 10s, capped at the fetch timeout.
    pub fn resolve_connect_timeout(&self) -> Duration {
        let secs = self
            .connect_timeout_secs
            .or_else(|| env_parse(ENV_CONNECT_TIMEOUT))
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);
        Duration::from_secs(secs.max(1)).min(self.resolve_fetch_timeout())
    }

    /// Cache TTL: JSON field → `CONTENT_CACHE_TTL_SECS` → 30 minutes.
    pub fn resolve_cache_ttl(&self) -> Duration {
        let secs = self
            .cache_ttl_secs
            .or_else(|| env_parse(ENV_CACHE_TTL))
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);
        Duration::from_secs(secs)
    }

    /// Cache capacity: JSON field → `CONTENT_CACHE_CAPACITY` → 10000.
    pub fn resolve_cache_capacity(&self) -> u64 {
        self.cache_max_capacity
            .or_else(|| env_parse(ENV_CACHE_CAPACITY))
            .unwrap_or(DEFAULT_CACHE_CAPACITY)
    }

    /// Early-exit threshold: JSON field → `EARLY_EXIT_SCORE` → 500.
    pub fn resolve_early_exit_score(&self) -> f64 {
        self.early_exit_score
            .or_else(|| env_parse(ENV_EARLY_EXIT_SCORE))
            .filter(|s: &f64| s.is_finite())
            .unwrap_or(DEFAULT_EARLY_EXIT_SCORE)
    }

    /// Listen port: JSON field → `ARTICLE_EXTRACT_PORT` / `PORT` → 5000.
    /// A `--port` command-line flag still wins over this (see `main`).
    pub fn resolve_port(&self) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        for k in ["ARTICLE_EXTRACT_PORT", "PORT"] {
            if let Some(p) = env_parse::<u16>(k) {
                return p;
            }
        }
        DEFAULT_PORT
    }
}

/// Load `article-extract.json` from standard locations.
///
/// Search order (first found wins):
/// 1. `ARTICLE_EXTRACT_CONFIG` env var path
/// 2. `./article-extract.json`
/// 3. `~/.article-extract/config.json`
///
/// Missing file → `ExtractorConfig::default()` (silent, all env-var fallbacks apply).
/// Parse error → log a warning, return `ExtractorConfig::default()`.
pub fn load_extractor_config() -> ExtractorConfig {
    let mut candidates = vec![PathBuf::from("article-extract.json")];
    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        candidates.insert(0, PathBuf::from(env_path));
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".article-extract").join("config.json"));
    }

    for path in &candidates {
        let Ok(contents) = std::fs::read_to_string(path) else {
            continue;
        };
        return match parse_extractor_config(&contents) {
            Ok(cfg) => {
                tracing::info!("article-extract config loaded from {}", path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!(
                    "article-extract config parse error at {}: {} (using defaults)",
                    path.display(),
                    e
                );
                ExtractorConfig::default()
            }
        };
    }

    ExtractorConfig::default()
}

pub fn parse_extractor_config(contents: &str) -> Result<ExtractorConfig, serde_json::Error> {
    serde_json::from_str::<ExtractorConfig>(contents)
}
