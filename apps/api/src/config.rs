use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub anthropic_api_key: String,
    /// Directory holding the file-backed key-value store.
    pub data_dir: PathBuf,
    /// When set, persistence goes to Redis instead of `data_dir`.
    pub redis_url: Option<String>,
    pub ai_timeout: Duration,
    pub export_timeout: Duration,
    /// Zero means every edit is written immediately.
    pub save_debounce: Duration,
    pub rasterizer_program: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").with_context(|| {
                "Required environment variable 'ANTHROPIC_API_KEY' is not set".to_string()
            })?,
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data")),
            redis_url: lookup("REDIS_URL").filter(|url| !url.trim().is_empty()),
            ai_timeout: Duration::from_secs(parse_or(&lookup, "AI_TIMEOUT_SECS", 60)?),
            export_timeout: Duration::from_secs(parse_or(&lookup, "EXPORT_TIMEOUT_SECS", 30)?),
            save_debounce: Duration::from_millis(parse_or(&lookup, "SAVE_DEBOUNCE_MS", 0)?),
            rasterizer_program: lookup("RASTERIZER_PROGRAM")
                .unwrap_or_else(|| "wkhtmltoimage".to_string()),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
