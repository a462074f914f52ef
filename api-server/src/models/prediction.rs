//! ML prediction models

use serde::{Deserialize, Serialize};
use validator::Validate;

use agririsk_core::logic::ml_client::Prediction;
use agririsk_core::PredictionInput;

/// Body of `POST /api/v1/ml/predict/batch`
#[derive(Debug, Deserialize, Validate)]
pub struct BatchPredictRequest {
    #[validate(length(min = 1, max = 500))]
    pub inputs: Vec<PredictionInput>,
}

#[derive(Debug, Serialize)]
pub struct BatchPredictResponse {
    pub count: usize,
    /// Items answered by the local scorer
    pub fallback_count: usize,
    pub predictions: Vec<Prediction>,
}
