//! Configuration module

use std::env;
use std::path::PathBuf;

use agririsk_core::MlClientConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Fraud-case store (JSON array)
    pub fraud_cases_path: PathBuf,

    /// Optional farmer seed file (JSON array of records)
    pub farmers_path: Option<PathBuf>,

    /// ML service client settings (ML_* variables)
    pub ml: MlClientConfig,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            fraud_cases_path: env::var("FRAUD_CASES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/fraud_cases.json")),

            farmers_path: env::var("FARMERS_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),

            ml: MlClientConfig::from_env(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
