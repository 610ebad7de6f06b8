//! Server configuration

use thiserror::Error;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration failures detected at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("no doctor directory configured: set DATABASE_URL, or SUPABASE_URL and SUPABASE_KEY")]
    NoDirectory,
}

/// Where doctor records are read from
#[derive(Debug, Clone)]
pub enum DirectoryConfig {
    /// Direct PostgreSQL connection
    Postgres { database_url: String },
    /// Supabase REST interface
    Supabase { url: String, key: String },
}

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub directory: DirectoryConfig,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables, after reading `.env`
    /// if one exists
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = var("GEMINI_API_KEY").ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let directory = match var("DATABASE_URL") {
            Some(database_url) => DirectoryConfig::Postgres { database_url },
            None => match (var("SUPABASE_URL"), var("SUPABASE_KEY")) {
                (Some(url), Some(key)) => DirectoryConfig::Supabase { url, key },
                (Some(_), None) => return Err(ConfigError::Missing("SUPABASE_KEY")),
                (None, Some(_)) => return Err(ConfigError::Missing("SUPABASE_URL")),
                (None, None) => return Err(ConfigError::NoDirectory),
            },
        };

        Ok(Self {
            bind_address: var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".into()),
            gemini_api_key,
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            gemini_base_url: var("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into()),
            directory,
            cors_origins: var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_else(|| vec!["*".to_string()]),
        })
    }
}
