//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every value can be overridden from the environment.

/// Default ML service URL (local FastAPI server)
pub const DEFAULT_ML_API_URL: &str = "http://localhost:8000";

/// Default per-call timeout (seconds)
pub const DEFAULT_ML_TIMEOUT_SECS: u64 = 10;

/// Default number of retries after the first attempt
pub const DEFAULT_ML_MAX_RETRIES: u32 = 3;

/// Default base delay for exponential backoff (milliseconds)
pub const DEFAULT_ML_BACKOFF_BASE_MS: u64 = 500;

/// Upper bound for a single backoff delay (milliseconds)
pub const MAX_BACKOFF_MS: u64 = 5_000;

/// App name
pub const APP_NAME: &str = "AgriRisk Pro";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get ML service URL from environment or use default
pub fn get_ml_api_url() -> String {
    std::env::var("ML_API_URL")
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_ML_API_URL.to_string())
}

/// Get ML call timeout from environment or use default
pub fn get_ml_timeout_secs() -> u64 {
    std::env::var("ML_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ML_TIMEOUT_SECS)
}

/// Get retry count from environment or use default
pub fn get_ml_max_retries() -> u32 {
    std::env::var("ML_MAX_RETRIES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ML_MAX_RETRIES)
}

/// Get backoff base delay from environment or use default
pub fn get_ml_backoff_base_ms() -> u64 {
    std::env::var("ML_BACKOFF_BASE_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ML_BACKOFF_BASE_MS)
}

/// Check if the local rule-based fallback is enabled
pub fn is_ml_fallback_enabled() -> bool {
    std::env::var("ML_ENABLE_FALLBACK")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}
