use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Runtime settings, read once from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Model credential. `None` means fallback-only mode.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
    /// Pause that stands in for the model call when serving fallback data
    pub fallback_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(60),
            fallback_delay: Duration::from_millis(800),
        }
    }
}

impl Config {
    /// Load from process environment (after `.env`, if present)
    pub fn init() -> Result<Config> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Config::default();

        let api_key = get("GEMINI_API_KEY").or_else(|| get("API_KEY"));
        let model = get("GEMINI_MODEL").unwrap_or(defaults.model);
        let base_url = get("GEMINI_BASE_URL").unwrap_or(defaults.base_url);

        let request_timeout = match get("APPRAISER_TIMEOUT_SECS") {
            Some(v) => {
                let message = format!(
                    "APPRAISER_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    v
                );
                Duration::from_secs(v.parse::<u64>().context(message)?)
            }
            None => defaults.request_timeout,
        };

        let fallback_delay = match get("APPRAISER_FALLBACK_DELAY_MS") {
            Some(v) => {
                let message = format!(
                    "APPRAISER_FALLBACK_DELAY_MS must be a whole number of milliseconds, got '{}'",
                    v
                );
                Duration::from_millis(v.parse::<u64>().context(message)?)
            }
            None => defaults.fallback_delay,
        };

        Ok(Config {
            api_key,
            model,
            base_url,
            request_timeout,
            fallback_delay,
        })
    }
}
