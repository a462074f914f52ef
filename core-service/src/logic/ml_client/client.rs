//! ML API Client
//!
//! HTTP client for the AgriRisk ML service (FastAPI).

use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

use super::error::MlError;
use super::fallback::local_prediction;
use super::normalize::{normalize_input, validate_output};
use super::retry::{run_with_retry, RetryOutcome, RetryPolicy, RetryState};
use super::types::{
    ApiResponse, BatchPredictionRequest, HealthResponse, HealthSummary, Prediction,
    PredictionInput, PredictionOutput, PredictionSource,
};
use crate::constants;

/// ML client configuration
#[derive(Debug, Clone)]
pub struct MlClientConfig {
    /// Base URL, without trailing slash
    pub api_url: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    pub enable_fallback: bool,
}

impl Default for MlClientConfig {
    fn default() -> Self {
        Self {
            api_url: constants::get_ml_api_url(),
            timeout_seconds: constants::get_ml_timeout_secs(),
            max_retries: constants::get_ml_max_retries(),
            backoff_base_ms: constants::get_ml_backoff_base_ms(),
            enable_fallback: constants::is_ml_fallback_enabled(),
        }
    }
}

impl MlClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.backoff_base_ms),
            max_delay: Duration::from_millis(constants::MAX_BACKOFF_MS),
            fallback_enabled: self.enable_fallback,
        }
    }
}

/// ML API client
pub struct MlClient {
    config: MlClientConfig,
    policy: RetryPolicy,
    http_client: reqwest::Client,
}

impl MlClient {
    /// Create new ML client
    pub fn new(config: MlClientConfig) -> Result<Self, MlError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| MlError::Client(e.to_string()))?;

        Ok(Self {
            policy: config.retry_policy(),
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &MlClientConfig {
        &self.config
    }

    /// Single farm prediction with retry and local fallback
    pub async fn predict(&self, input: PredictionInput) -> Result<Prediction, MlError> {
        let input = normalize_input(input)?;

        match self.run_predict(&input).await {
            RetryOutcome::Succeeded { value, attempts } => {
                log::debug!("ML prediction: score {} after {} attempt(s)", value.risk_score, attempts);
                Ok(Prediction {
                    output: value,
                    state: RetryState::Succeeded,
                    attempts,
                })
            }
            RetryOutcome::FallbackUsed { attempts, .. } => Ok(Self::fallback(&input, attempts)),
            RetryOutcome::Failed { error, .. } => Err(error),
        }
    }

    /// Batch prediction.
    ///
    /// One call to the batch endpoint; if it fails for any reason, every
    /// item goes through the single-item path one by one. With fallback
    /// enabled a failing item is answered locally instead of failing the
    /// batch.
    pub async fn predict_batch(&self, inputs: Vec<PredictionInput>) -> Result<Vec<Prediction>, MlError> {
        let inputs = inputs
            .into_iter()
            .map(normalize_input)
            .collect::<Result<Vec<_>, _>>()?;

        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        match self.send_batch(&inputs).await {
            Ok(outputs) => Ok(outputs
                .into_iter()
                .map(|output| Prediction {
                    output,
                    state: RetryState::Succeeded,
                    attempts: 1,
                })
                .collect()),
            Err(e) => {
                log::warn!(
                    "Batch prediction failed ({}), falling back to {} sequential calls",
                    e,
                    inputs.len()
                );
                let mut predictions = Vec::with_capacity(inputs.len());
                for (index, input) in inputs.iter().enumerate() {
                    let prediction = match self.run_predict(input).await {
                        RetryOutcome::Succeeded { value, attempts } => Prediction {
                            output: value,
                            state: RetryState::Succeeded,
                            attempts,
                        },
                        RetryOutcome::FallbackUsed { attempts, .. } => Self::fallback(input, attempts),
                        RetryOutcome::Failed { error, attempts } if self.config.enable_fallback => {
                            log::warn!("Batch item {} failed ({}), scoring locally", index, error);
                            Self::fallback(input, attempts)
                        }
                        RetryOutcome::Failed { error, .. } => return Err(error),
                    };
                    predictions.push(prediction);
                }
                Ok(predictions)
            }
        }
    }

    /// Check service health; never fails, an unreachable service is unhealthy
    pub async fn health_check(&self) -> HealthSummary {
        let url = format!("{}/health", self.config.api_url);
        let started = Instant::now();

        let result: Result<HealthResponse, MlError> = async {
            let response = self.http_client.get(&url).send().await?;
            Self::read_json(response).await
        }
        .await;

        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(health) => HealthSummary {
                healthy: health.status == "healthy",
                status: health.status,
                message: health.message,
                model_loaded: health.model_loaded,
                latency_ms,
                api_url: self.config.api_url.clone(),
                checked_at: chrono::Utc::now(),
            },
            Err(e) => {
                log::warn!("ML service health check failed: {}", e);
                HealthSummary {
                    healthy: false,
                    status: "unreachable".to_string(),
                    message: e.to_string(),
                    model_loaded: false,
                    latency_ms,
                    api_url: self.config.api_url.clone(),
                    checked_at: chrono::Utc::now(),
                }
            }
        }
    }

    /// Model metadata, passed through as JSON
    pub async fn model_info(&self) -> Result<serde_json::Value, MlError> {
        let url = format!("{}/model/info", self.config.api_url);
        let response = self.http_client.get(&url).send().await?;
        Self::read_json(response).await
    }

    // ------------------------------------------------------------------------

    /// Retried call for an already normalized input
    async fn run_predict(&self, input: &PredictionInput) -> RetryOutcome<PredictionOutput> {
        run_with_retry(&self.policy, |_| self.send_predict(input)).await
    }

    fn fallback(input: &PredictionInput, attempts: u32) -> Prediction {
        Prediction {
            output: local_prediction(input),
            state: RetryState::FallbackUsed,
            attempts,
        }
    }

    async fn send_predict(&self, input: &PredictionInput) -> Result<PredictionOutput, MlError> {
        let url = format!("{}/predict", self.config.api_url);

        let response = self.http_client.post(&url).json(input).send().await?;
        let envelope: ApiResponse<serde_json::Value> = Self::read_json(response).await?;
        let data = Self::unwrap_envelope(envelope)?;

        Self::parse_output(data)
    }

    async fn send_batch(&self, inputs: &[PredictionInput]) -> Result<Vec<PredictionOutput>, MlError> {
        let url = format!("{}/predict/batch", self.config.api_url);

        let response = self
            .http_client
            .post(&url)
            .json(&BatchPredictionRequest { inputs })
            .send()
            .await?;
        let envelope: ApiResponse<Vec<serde_json::Value>> = Self::read_json(response).await?;
        let data = Self::unwrap_envelope(envelope)?;

        if data.len() != inputs.len() {
            return Err(MlError::Validation(format!(
                "batch returned {} results for {} inputs",
                data.len(),
                inputs.len()
            )));
        }

        data.into_iter().map(Self::parse_output).collect()
    }

    /// Status check + JSON decode
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, MlError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            let detail = response.text().await.unwrap_or_default();
            return Err(MlError::Validation(format!("ML service rejected input: {}", detail)));
        }
        if !status.is_success() {
            return Err(MlError::Server(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| MlError::Parse(e.to_string()))
    }

    fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T, MlError> {
        match (envelope.success, envelope.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(MlError::Remote("response has no data".to_string())),
            (false, _) => Err(MlError::Remote(
                envelope.error.unwrap_or_else(|| "prediction failed".to_string()),
            )),
        }
    }

    /// Schema mismatches surface as validation errors
    fn parse_output(data: serde_json::Value) -> Result<PredictionOutput, MlError> {
        let mut output: PredictionOutput = serde_json::from_value(data)
            .map_err(|e| MlError::Validation(format!("unexpected ML response: {}", e)))?;
        validate_output(&output)?;
        output.source = PredictionSource::Model;
        Ok(output)
    }
}
