use std::{collections::BTreeMap, fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::core::error::ProbeError;

pub const DEFAULT_CONFIG_PATH: &str = "config/namehawk.toml";
pub const DEFAULT_MARKER: &str = "The specified profile could not be found.";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Pause after a 429 before the identical request is sent again.
    pub backoff_secs: u64,
    /// Total attempts per request, the first one included.
    pub max_attempts: u32,
    /// Minimum spacing between consecutive requests; 0 disables pacing.
    pub min_interval_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            backoff_secs: 10,
            max_attempts: 10,
            min_interval_ms: 0,
        }
    }
}

impl RateLimitConfig {
    pub fn backoff(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub user_agent: String,
    pub referer: String,
    pub extra: BTreeMap<String, String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        // Accept-Encoding is negotiated by reqwest (gzip/deflate features).
        let extra = [
            ("Accept-Language", "en-US,en;q=0.5"),
            ("Connection", "keep-alive"),
            ("DNT", "1"),
            ("Upgrade-Insecure-Requests", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) CustomBrowser/1.0".to_string(),
            referer: "https://store.steampowered.com/".to_string(),
            extra,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Profile URL prefix; the candidate word is appended verbatim.
    pub base_url: String,
    /// Body text the service returns for a nonexistent profile.
    pub marker: String,
    pub wordlist: String,
    pub output: String,
    pub timeout_ms: u64,
    pub rate_limit: RateLimitConfig,
    pub headers: HeaderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://steamcommunity.com/id/".to_string(),
            marker: DEFAULT_MARKER.to_string(),
            wordlist: "words.txt".to_string(),
            output: "available_words.txt".to_string(),
            timeout_ms: 15_000,
            rate_limit: RateLimitConfig::default(),
            headers: HeaderConfig::default(),
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ProbeError> {
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    let explicit = path.is_some();
    let path = path.unwrap_or(default_path);

    if !path.exists() {
        if explicit {
            return Err(ProbeError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| ProbeError::Config(e.to_string()))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ProbeError> {
    let cfg: AppConfig =
        toml::from_str(content).map_err(|e| ProbeError::Config(e.to_string()))?;
    if cfg.rate_limit.max_attempts == 0 {
        return Err(ProbeError::Config(
            "rate_limit.max_attempts must be at least 1".into(),
        ));
    }
    if cfg.marker.is_empty() {
        return Err(ProbeError::Config("marker must not be empty".into()));
    }
    Ok(cfg)
}
