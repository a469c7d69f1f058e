use serde::Deserialize;
use std::env;

use crate::core::{AppError, Result};

/// Library configuration
///
/// Endpoint overrides point a backend at something other than its default
/// processor URL (a sandbox or a local stub).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub authorize_endpoint: Option<String>,
    pub nmi_endpoint: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Ok(Config {
            authorize_endpoint: env::var("PAYGATE_AUTHORIZE_ENDPOINT").ok(),
            nmi_endpoint: env::var("PAYGATE_NMI_ENDPOINT").ok(),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for (name, endpoint) in [
            ("PAYGATE_AUTHORIZE_ENDPOINT", &self.authorize_endpoint),
            ("PAYGATE_NMI_ENDPOINT", &self.nmi_endpoint),
        ] {
            if let Some(url) = endpoint {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(AppError::configuration(format!(
                        "{} must be an http(s) URL, got '{}'",
                        name, url
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            authorize_endpoint: None,
            nmi_endpoint: None,
            log_level: "info".to_string(),
        }
    }
}
