use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 20;
const DEFAULT_MAX_PDF_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Everything has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Without a key, suggestions are always rule-based.
    pub llm_api_key: Option<String>,
    pub llm_timeout_secs: u64,
    /// Replaces the embedded skill dictionary when set.
    pub skills_path: Option<PathBuf>,
    pub max_pdf_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", DEFAULT_PORT)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?,
            skills_path: optional_env("SKILLS_PATH").map(PathBuf::from),
            max_pdf_bytes: parse_env("MAX_PDF_BYTES", DEFAULT_MAX_PDF_BYTES)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            llm_api_key: None,
            llm_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            skills_path: None,
            max_pdf_bytes: DEFAULT_MAX_PDF_BYTES,
        }
    }
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .with_context(|| format!("{key} must be a valid number, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_numbers() {
        assert_eq!(parse_value::<u16>("PORT", "3000").unwrap(), 3000);
        assert_eq!(parse_value::<usize>("MAX_PDF_BYTES", "1048576").unwrap(), 1_048_576);
    }

    #[test]
    fn test_parse_value_error_names_the_variable() {
        let err = parse_value::<u16>("PORT", "99999").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.llm_timeout_secs, 20);
        assert_eq!(config.max_pdf_bytes, 5 * 1024 * 1024);
        assert!(config.llm_api_key.is_none());
        assert!(config.skills_path.is_none());
    }
}
