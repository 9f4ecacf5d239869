//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Shared PIN accepted when no access-proxy identity is present.
    pub emergency_pin: String,
    /// TOON card batch served by the study endpoints.
    pub cards_path: PathBuf,
    /// Default size of the study queue.
    pub due_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            emergency_pin: "1234".to_string(),
            cards_path: PathBuf::from("src/data/flashcards.toon"),
            due_limit: 20,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);

        let port = match env::var("PORT") {
            Ok(port) => port.parse().map_err(|_| ConfigError::InvalidPort)?,
            Err(_) => defaults.port,
        };

        let emergency_pin = env::var("EMERGENCY_PIN").unwrap_or(defaults.emergency_pin);

        let cards_path = env::var("CARDS_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.cards_path);

        let due_limit = match env::var("DUE_LIMIT") {
            Ok(limit) => limit.parse().map_err(|_| ConfigError::InvalidDueLimit)?,
            Err(_) => defaults.due_limit,
        };

        Ok(Self {
            host,
            port,
            emergency_pin,
            cards_path,
            due_limit,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("Invalid DUE_LIMIT value")]
    InvalidDueLimit,
}
