use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Process configuration, read once at startup and passed into constructors.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials_file: PathBuf,
    pub token_file: PathBuf,
    pub port: u16,
    /// Shared secret for the stats page. Empty means open access.
    pub stats_token: String,
    /// Shared secret for the metrics endpoint. Empty means open access.
    pub metrics_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let credentials_file = env::var("CREDENTIALS_FILE")
            .unwrap_or_else(|_| "credentials.json".to_string())
            .into();

        let token_file = env::var("TOKEN_FILE")
            .unwrap_or_else(|_| "token.json".to_string())
            .into();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("Failed to parse PORT")?;

        let stats_token = env::var("STATS_TOKEN").unwrap_or_default();
        let metrics_token = env::var("METRICS_TOKEN").unwrap_or_default();

        Ok(Config {
            credentials_file,
            token_file,
            port,
            stats_token,
            metrics_token,
        })
    }
}
