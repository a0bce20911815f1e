//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.

use std::env;
use std::path::PathBuf;

use pos_core::StockPolicy;

/// REST API server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,

    /// Path to the SQLite database file
    pub database_path: PathBuf,

    /// Oversell behavior at checkout
    pub stock_policy: StockPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./pos.db".to_string())
                .into(),

            stock_policy: match env::var("STOCK_POLICY").as_deref() {
                Ok("allow_negative") => StockPolicy::AllowNegative,
                Ok("reject_oversell") | Err(_) => StockPolicy::RejectOversell,
                Ok(_) => return Err(ConfigError::InvalidValue("STOCK_POLICY".to_string())),
            },
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
