use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Cron schedule for the nearly-sold-out announcement refresh.
    pub announcement_refresh_cron: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            announcement_refresh_cron: env::var("ANNOUNCEMENT_REFRESH_CRON")
                .unwrap_or_else(|_| "0 0 * * * *".to_string()),
        })
    }
}
