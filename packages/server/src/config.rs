use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: non_empty_var("DATABASE_URL"),
            database_name: non_empty_var("DATABASE_NAME"),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
        })
    }

    /// Location and name, when both are configured.
    pub fn database(&self) -> Option<(&str, &str)> {
        match (&self.database_url, &self.database_name) {
            (Some(url), Some(name)) => Some((url.as_str(), name.as_str())),
            _ => None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
