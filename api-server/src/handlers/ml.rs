//! ML service handlers

use axum::{extract::State, Json};
use validator::Validate;

use agririsk_core::logic::ml_client::{HealthSummary, Prediction, RetryState};
use agririsk_core::PredictionInput;

use crate::models::{BatchPredictRequest, BatchPredictResponse};
use crate::{AppResult, AppState};

/// Single prediction (retry + local fallback)
pub async fn predict(
    State(state): State<AppState>,
    Json(input): Json<PredictionInput>,
) -> AppResult<Json<Prediction>> {
    let prediction = state.ml.predict(input).await?;
    Ok(Json(prediction))
}

/// Batch prediction
pub async fn predict_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchPredictRequest>,
) -> AppResult<Json<BatchPredictResponse>> {
    req.validate()?;

    let predictions = state.ml.predict_batch(req.inputs).await?;
    let fallback_count = predictions
        .iter()
        .filter(|p| p.state == RetryState::FallbackUsed)
        .count();

    if fallback_count > 0 {
        tracing::warn!("{} of {} predictions used the local fallback", fallback_count, predictions.len());
    }

    Ok(Json(BatchPredictResponse {
        count: predictions.len(),
        fallback_count,
        predictions,
    }))
}

/// ML service health
pub async fn health(State(state): State<AppState>) -> Json<HealthSummary> {
    Json(state.ml.health_check().await)
}

/// Model metadata passthrough
pub async fn model_info(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    Ok(Json(state.ml.model_info().await?))
}
