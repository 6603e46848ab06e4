use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Client configuration loaded from environment variables.
/// Every key has a default; only malformed values are errors.
#[derive(Debug, Clone)]
pub struct Config {
    pub scorer_base_url: Url,
    pub timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("SCORER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match lookup("SCORER_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("SCORER_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            scorer_base_url: parse_base_url(&base_url)?,
            timeout: Duration::from_secs(timeout_secs),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

pub fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw).with_context(|| format!("'{raw}' is not a valid scoring service URL"))
}
