use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod api;

pub use api::ApiConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub invoicing: InvoicingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoicingConfig {
    /// Days between invoice date and due date
    pub due_days: u32,
}

impl Default for InvoicingConfig {
    fn default() -> Self {
        Self { due_days: 30 }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            api: ApiConfig::from_env()?,
            invoicing: InvoicingConfig {
                due_days: env::var("INVOICE_DUE_DAYS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid INVOICE_DUE_DAYS".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url().is_empty() {
            return Err(AppError::Configuration("API_URL cannot be empty".to_string()));
        }

        if !self.api.base_url().starts_with("http://") && !self.api.base_url().starts_with("https://") {
            return Err(AppError::Configuration(format!(
                "API_URL must be an http(s) URL, got {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "API timeout must be greater than 0".to_string(),
            ));
        }

        if self.invoicing.due_days == 0 {
            return Err(AppError::Configuration(
                "Invoice due days must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
