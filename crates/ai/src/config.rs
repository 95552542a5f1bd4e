//! Vendor configuration loaded from the environment.

use std::time::Duration;

/// Default xAI base URL.
pub const DEFAULT_XAI_BASE_URL: &str = "https://api.x.ai";
/// Default chat model.
pub const DEFAULT_XAI_MODEL: &str = "grok-beta";
/// Default Black Forest Labs base URL.
pub const DEFAULT_BFL_BASE_URL: &str = "https://api.bfl.ml";
/// Default Flux model endpoint.
pub const DEFAULT_FLUX_MODEL: &str = "flux-pro-1.1";
/// Default number of status polls before giving up on an image job.
pub const DEFAULT_POLL_ATTEMPTS: u32 = 40;
/// Default delay between status polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
/// Per-request HTTP timeout for chat completions.
pub const DEFAULT_TEXT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct TextModelConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ImageModelConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub poll_attempts: u32,
    pub poll_interval: Duration,
}

/// Which vendors are enabled. A vendor without an API key is `None`.
#[derive(Debug, Clone, Default)]
pub struct AiConfig {
    pub text: Option<TextModelConfig>,
    pub image: Option<ImageModelConfig>,
}

impl AiConfig {
    /// Load vendor configuration from environment variables.
    ///
    /// | Env Var                  | Default                |
    /// |--------------------------|------------------------|
    /// | `XAI_API_KEY`            | unset (text disabled)  |
    /// | `XAI_BASE_URL`           | `https://api.x.ai`     |
    /// | `XAI_MODEL`              | `grok-beta`            |
    /// | `BFL_API_KEY`            | unset (image disabled) |
    /// | `BFL_BASE_URL`           | `https://api.bfl.ml`   |
    /// | `FLUX_MODEL`             | `flux-pro-1.1`         |
    /// | `FLUX_POLL_ATTEMPTS`     | `40`                   |
    /// | `FLUX_POLL_INTERVAL_MS`  | `500`                  |
    pub fn from_env() -> Self {
        let text = non_empty_var("XAI_API_KEY").map(|api_key| TextModelConfig {
            api_key,
            base_url: var_or("XAI_BASE_URL", DEFAULT_XAI_BASE_URL),
            model: var_or("XAI_MODEL", DEFAULT_XAI_MODEL),
            timeout: Duration::from_secs(DEFAULT_TEXT_TIMEOUT_SECS),
        });

        let image = non_empty_var("BFL_API_KEY").map(|api_key| ImageModelConfig {
            api_key,
            base_url: var_or("BFL_BASE_URL", DEFAULT_BFL_BASE_URL),
            model: var_or("FLUX_MODEL", DEFAULT_FLUX_MODEL),
            poll_attempts: var_or("FLUX_POLL_ATTEMPTS", &DEFAULT_POLL_ATTEMPTS.to_string())
                .parse()
                .expect("FLUX_POLL_ATTEMPTS must be a valid u32"),
            poll_interval: Duration::from_millis(
                var_or("FLUX_POLL_INTERVAL_MS", &DEFAULT_POLL_INTERVAL_MS.to_string())
                    .parse()
                    .expect("FLUX_POLL_INTERVAL_MS must be a valid u64"),
            ),
        });

        Self { text, image }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
