use std::time::Duration;

use anyhow::{Context, Result};

use crate::image_client::DEFAULT_REPLICATE_URL;
use crate::llm_client::DEFAULT_ANTHROPIC_URL;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
///
/// Provider credentials are deliberately absent: BYOK keys arrive with each
/// request and are never configured server-side.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_url: String,
    pub replicate_api_url: String,
    pub provider_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_url: env_or("ANTHROPIC_API_URL", DEFAULT_ANTHROPIC_URL),
            replicate_api_url: env_or("REPLICATE_API_URL", DEFAULT_REPLICATE_URL),
            provider_timeout: Duration::from_secs(
                env_or("PROVIDER_TIMEOUT_SECS", "120")
                    .parse::<u64>()
                    .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
