//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub engine: EngineConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Status engine tunables
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Automatic retries for one collaborator write (idempotent replays)
    #[serde(default = "default_write_retries")]
    pub write_retries: u32,
    /// Adjacent messages by one author group under one header within this gap
    #[serde(default = "default_grouping_window_minutes")]
    pub grouping_window_minutes: i64,
    /// Bound on digest highlight lists
    #[serde(default = "default_digest_highlight_limit")]
    pub digest_highlight_limit: usize,
    /// Broadcast buffer for the notification surface
    #[serde(default = "default_notification_buffer")]
    pub notification_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            write_retries: default_write_retries(),
            grouping_window_minutes: default_grouping_window_minutes(),
            digest_highlight_limit: default_digest_highlight_limit(),
            notification_buffer: default_notification_buffer(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "gameplan".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_write_retries() -> u32 {
    1
}

fn default_grouping_window_minutes() -> i64 {
    5
}

fn default_digest_highlight_limit() -> usize {
    3
}

fn default_notification_buffer() -> usize {
    64
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            engine: EngineConfig {
                write_retries: env::var("SYNC_WRITE_RETRIES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_write_retries),
                grouping_window_minutes: env::var("GROUPING_WINDOW_MINUTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_grouping_window_minutes),
                digest_highlight_limit: env::var("DIGEST_HIGHLIGHT_LIMIT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_digest_highlight_limit),
                notification_buffer: env::var("NOTIFICATION_BUFFER")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_notification_buffer),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_predicates() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Development.is_development());
        assert!(!Environment::Production.is_development());
    }

    #[test]
    fn test_engine_defaults() {
        let engine = EngineConfig::default();
        assert_eq!(engine.write_retries, 1);
        assert_eq!(engine.grouping_window_minutes, 5);
        assert_eq!(engine.digest_highlight_limit, 3);
        assert_eq!(engine.notification_buffer, 64);
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_name(), "gameplan");
        assert_eq!(default_max_connections(), 20);
        assert_eq!(default_min_connections(), 5);
    }
}
