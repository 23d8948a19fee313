//! # Unified Application Configuration
//!
//! Centralized configuration loaded from environment variables (with `.env`
//! support via dotenvy in main). Every section validates itself so startup
//! fails fast on a bad deployment instead of at the first request.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Bot-specific configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    /// HTTP client timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            http_timeout_secs: 30,
        }
    }
}

impl BotConfig {
    /// Validate bot configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.token.trim().is_empty() {
            return Err(AppError::Config("Bot token cannot be empty".to_string()));
        }

        // Telegram bot tokens have the shape 'bot_id:secret'
        let parts: Vec<&str> = self.token.split(':').collect();
        if parts.len() != 2 {
            return Err(AppError::Config(
                "Bot token format is invalid. Expected format: 'bot_id:bot_token'".to_string(),
            ));
        }

        if parts[0].parse::<u64>().is_err() {
            return Err(AppError::Config(
                "Bot token bot ID must be numeric".to_string(),
            ));
        }

        if parts[1].len() < 20 {
            return Err(AppError::Config(
                "Bot token appears to be too short. Please verify it's a valid token".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 || self.http_timeout_secs > 300 {
            return Err(AppError::Config(
                "HTTP timeout must be between 1 and 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Database configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.url.trim().is_empty() {
            return Err(AppError::Config("Database URL cannot be empty".to_string()));
        }

        if !self.url.starts_with("postgresql://") && !self.url.starts_with("postgres://") {
            return Err(AppError::Config(
                "Database URL must start with 'postgresql://' or 'postgres://'".to_string(),
            ));
        }

        if self.max_connections == 0 || self.max_connections > 100 {
            return Err(AppError::Config(
                "Database max connections must be between 1 and 100".to_string(),
            ));
        }

        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 300 {
            return Err(AppError::Config(
                "Database connect timeout must be between 1 and 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Observability configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Deployment environment (development, staging, production)
    pub environment: String,
    /// Log level for the crate's own spans and events
    pub log_level: String,
    /// Port for the Prometheus metrics / health endpoint
    pub metrics_port: u16,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            metrics_port: 9090,
        }
    }
}

impl ObservabilityConfig {
    /// Validate observability configuration
    pub fn validate(&self) -> AppResult<()> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(AppError::Config(format!(
                    "Unknown log level '{}'. Expected trace, debug, info, warn or error",
                    other
                )));
            }
        }

        if self.metrics_port < 1024 {
            return Err(AppError::Config(format!(
                "Metrics port {} is a privileged port (< 1024)",
                self.metrics_port
            )));
        }

        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let bot = BotConfig {
            token: env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
                AppError::Config(
                    "TELEGRAM_BOT_TOKEN environment variable is required but not set".to_string(),
                )
            })?,
            http_timeout_secs: parse_env("HTTP_CLIENT_TIMEOUT_SECS", 30)?,
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").map_err(|_| {
                AppError::Config(
                    "DATABASE_URL environment variable is required but not set".to_string(),
                )
            })?,
            max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10)?,
            connect_timeout_secs: parse_env("DATABASE_CONNECT_TIMEOUT_SECS", 30)?,
        };

        let observability = ObservabilityConfig {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            metrics_port: parse_env("METRICS_PORT", 9090)?,
        };

        Ok(Self {
            bot,
            database,
            observability,
        })
    }

    /// Validate the complete configuration
    pub fn validate(&self) -> AppResult<()> {
        self.bot.validate()?;
        self.database.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| AppError::Config(format!("{} must be a valid number", key))),
        Err(_) => Ok(default),
    }
}
