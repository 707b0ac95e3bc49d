/// Application configuration module
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_CITY: &str = "lima";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub default_city: String,
    pub reprobe_before_fetch: bool,
    pub timeouts: Timeouts,
}

#[derive(Clone, Debug)]
pub struct Timeouts {
    pub probe: Duration,
    pub request: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_city: DEFAULT_CITY.to_string(),
            reprobe_before_fetch: false,
            timeouts: Timeouts {
                probe: Duration::from_secs(3),
                request: Duration::from_secs(10),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_base_url = get("API_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            anyhow::bail!("API_BASE_URL must be an http(s) URL, got '{}'", api_base_url);
        }

        let default_city = get("DEFAULT_CITY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CITY.to_string());

        let timeouts = Timeouts {
            probe: Duration::from_secs(parse_u64(get("PROBE_TIMEOUT_SECS"), 3)),
            request: Duration::from_secs(parse_u64(get("REQUEST_TIMEOUT_SECS"), 10)),
        };

        Ok(Self {
            api_base_url,
            default_city,
            reprobe_before_fetch: parse_bool(get("REPROBE_BEFORE_FETCH"), false),
            timeouts,
        })
    }
}

/// Zero is rejected: a zero timeout would fail every request.
fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn parse_bool(raw: Option<String>, default: bool) -> bool {
    match raw.as_deref().map(str::trim) {
        Some("1") | Some("true") | Some("yes") => true,
        Some("0") | Some("false") | Some("no") => false,
        _ => default,
    }
}
