use anyhow::{Context, Result};
use chrono::Duration;
use dotenvy::dotenv;
use llm_client::Provider;
use std::env;
use std::str::FromStr;

/// Knobs for hint generation and normalisation.
#[derive(Debug, Clone)]
pub struct AssistantSettings {
    pub default_provider: Provider,
    pub max_hints: usize,
    pub max_debug_tips: usize,
    /// Cached hints older than this are regenerated.
    pub hint_cache_ttl: Duration,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            default_provider: Provider::Gemini,
            max_hints: 3,
            max_debug_tips: 5,
            hint_cache_ttl: Duration::hours(24),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub llm_timeout_secs: u64,
    pub assistant: AssistantSettings,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
    pub development: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Blank values behave like unset ones.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let default_provider = match get("DEFAULT_LLM_PROVIDER") {
            Some(value) => Provider::from_str(&value)
                .context("DEFAULT_LLM_PROVIDER must be 'gemini' or 'openai'")?,
            None => Provider::Gemini,
        };

        let hint_cache_ttl_hours: i64 = parse_or(&get, "HINT_CACHE_TTL_HOURS", 24)?;
        let hint_cache_ttl = Some(hint_cache_ttl_hours)
            .filter(|hours| *hours > 0)
            .and_then(Duration::try_hours)
            .context("HINT_CACHE_TTL_HOURS must be a positive number of hours")?;

        Ok(Self {
            database_url: get("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 10)?,
            port: parse_or(&get, "PORT", 3000)?,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| "gemini-pro".to_string()),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| "gpt-4".to_string()),
            llm_timeout_secs: parse_or(&get, "LLM_TIMEOUT_SECS", 30)?,
            assistant: AssistantSettings {
                default_provider,
                max_hints: parse_or(&get, "MAX_HINTS_PER_PROBLEM", 3)?,
                max_debug_tips: parse_or(&get, "MAX_DEBUG_TIPS", 5)?,
                hint_cache_ttl,
            },
            allowed_origins: get("ALLOWED_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            rate_limit_per_second: parse_or(&get, "RATE_LIMIT_PER_SECOND", 10)?,
            rate_limit_burst: parse_or(&get, "RATE_LIMIT_BURST", 20)?,
            development: get("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("development"))
                .unwrap_or(false),
        })
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", key)),
        None => Ok(default),
    }
}
