use std::env;

use anyhow::{bail, Result};

/// Runtime configuration, loaded from environment variables at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub completion_timeout_ms: u64,
    pub crawl_timeout_ms: u64,
    pub rate_limit_per_day: u32,
    pub allowed_origin: String,
}

impl AppConfig {
    /// Fails fast when the completion API key is absent rather than
    /// producing per-request authentication errors later.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        if openai_api_key.trim().is_empty() {
            bail!("OPENAI_API_KEY is not set; refusing to start without completion credentials");
        }

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let max_tokens = env::var("COMPLETION_MAX_TOKENS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(500);

        let completion_timeout_ms = env::var("COMPLETION_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(30_000);

        let crawl_timeout_ms = env::var("CRAWL_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(10_000);

        let rate_limit_per_day = env::var("RATE_LIMIT_PER_DAY")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(20);

        let allowed_origin = env::var("ALLOWED_ORIGIN")
            .unwrap_or_else(|_| "https://55realty.vercel.app".to_string());

        Ok(Self {
            port,
            openai_api_key,
            openai_base_url,
            model,
            max_tokens,
            completion_timeout_ms,
            crawl_timeout_ms,
            rate_limit_per_day,
            allowed_origin,
        })
    }
}
