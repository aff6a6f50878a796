use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub mailer_api_url: String,
    pub mailer_api_key: String,
    pub mailer_from: String,
    /// Empty means any origin is allowed
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            mailer_api_url: required("MAILER_API_URL")?,
            mailer_api_key: required("MAILER_API_KEY")?,
            mailer_from: required("MAILER_FROM")?,
            allowed_origins: parse_list(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }
}

/// Secrets must be present and non-empty; there is no fallback value.
fn required(name: &str) -> Result<String> {
    let value = env::var(name).with_context(|| format!("{} must be set", name))?;
    if value.trim().is_empty() {
        anyhow::bail!("{} must not be empty", name);
    }
    Ok(value)
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
