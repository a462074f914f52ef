//! ML Client Module - Risk Model Service Communication
//!
//! This module handles:
//! - Input normalization and schema validation
//! - Single and batch predictions against the ML service
//! - Retry with exponential backoff on transient failures
//! - Local rule-based fallback when the service stays down
//! - Health checks with latency
//!
//! ## Structure
//! - `types`: Request/response wire types
//! - `error`: MlError
//! - `retry`: Retry state machine & backoff
//! - `normalize`: Input coercion, input/output schema checks
//! - `fallback`: Local scorer shaped as a prediction
//! - `client`: MlClient, MlClientConfig
//!
//! ## Usage
//! ```ignore
//! use agririsk_core::logic::ml_client::{MlClient, MlClientConfig};
//!
//! let client = MlClient::new(MlClientConfig::from_env())?;
//! let prediction = client.predict(input).await?;
//! println!("{} ({:?})", prediction.output.risk_score, prediction.state);
//! ```

pub mod types;
pub mod error;
pub mod retry;
pub mod normalize;
pub mod fallback;
pub mod client;

#[cfg(test)]
pub(crate) mod tests;

pub use types::{
    FactorImpact,
    HealthSummary,
    MlBreakdown,
    Prediction,
    PredictionInput,
    PredictionOutput,
    PredictionSource,
};

pub use error::MlError;
pub use retry::{backoff_delay, run_with_retry, RetryOutcome, RetryPolicy, RetryState};
pub use normalize::{normalize_input, validate_input, validate_output};
pub use fallback::local_prediction;
pub use client::{MlClient, MlClientConfig};
