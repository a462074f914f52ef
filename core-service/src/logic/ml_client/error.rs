//! ML client errors

use thiserror::Error;

/// Errors from the ML client.
///
/// Transient errors (`Network`, `Timeout`, `Server` 5xx) are retried.
/// `Validation` is raised before or after the call when data does not
/// fit the schema; it is never retried and never falls back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MlError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Server error: {0}")]
    Server(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("ML service error: {0}")]
    Remote(String),

    #[error("Client error: {0}")]
    Client(String),
}

impl MlError {
    /// Worth another attempt after a backoff
    pub fn is_retryable(&self) -> bool {
        match self {
            MlError::Network(_) | MlError::Timeout(_) => true,
            MlError::Server(status) => *status >= 500,
            _ => false,
        }
    }

    /// May be answered with the local scorer instead
    pub fn allows_fallback(&self) -> bool {
        !matches!(self, MlError::Validation(_))
    }
}

impl From<reqwest::Error> for MlError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MlError::Timeout(err.to_string())
        } else if err.is_decode() {
            MlError::Parse(err.to_string())
        } else if err.is_builder() {
            MlError::Client(err.to_string())
        } else {
            MlError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(MlError::Network("refused".into()).is_retryable());
        assert!(MlError::Timeout("10s".into()).is_retryable());
        assert!(MlError::Server(503).is_retryable());
        assert!(!MlError::Server(404).is_retryable());
        assert!(!MlError::Validation("bad".into()).is_retryable());
        assert!(!MlError::Remote("model failed".into()).is_retryable());
    }

    #[test]
    fn test_validation_never_falls_back() {
        assert!(!MlError::Validation("bad".into()).allows_fallback());
        assert!(MlError::Server(500).allows_fallback());
        assert!(MlError::Remote("oops".into()).allows_fallback());
    }
}
