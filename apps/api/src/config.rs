use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::extraction::{ExtractionOptions, DEFAULT_SIBLINGS_EXAMINED};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the linguistic annotation server.
    pub annotator_url: String,
    pub port: u16,
    pub rust_log: String,
    pub extraction: ExtractionOptions,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            annotator_url: require_env("ANNOTATOR_URL")?,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            extraction: ExtractionOptions {
                sibling_scan: optional_env("SIBLING_SCAN", Default::default())?,
                siblings_examined: optional_env("SIBLINGS_EXAMINED", DEFAULT_SIBLINGS_EXAMINED)?,
                job_level_match: optional_env("JOB_LEVEL_MATCH", Default::default())?,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow!("{key} has invalid value '{raw}': {e}"))
}
