//! Fraud check handlers

use axum::{extract::{State, Path}, Json};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use agririsk_core::{adjust_trust_score, detect_fraud};

use crate::models::{FraudCase, FraudCheckRequest, DEFAULT_TRUST_SCORE};
use crate::{AppError, AppResult, AppState};

/// Run all fraud checks and store the case
pub async fn check(
    State(state): State<AppState>,
    Json(req): Json<FraudCheckRequest>,
) -> AppResult<Json<FraudCase>> {
    req.validate()?;

    let farmer = req
        .farmer_id
        .as_deref()
        .and_then(|id| state.farmers.find_by_id(id));

    if let (None, Some(id)) = (&farmer, &req.farmer_id) {
        tracing::warn!("Farmer {} not found, checking request data only", id);
    }

    let mut params = req.params;
    if params.verified_land_acres.is_none() {
        params.verified_land_acres = farmer.as_ref().map(|f| f.land_acres);
    }

    let result = detect_fraud(&params);
    let trust_score = adjust_trust_score(
        req.base_trust_score.unwrap_or(DEFAULT_TRUST_SCORE),
        &result.flags,
        farmer.as_ref().and_then(|f| f.historical_claims_accuracy),
    );

    let now = Utc::now();
    let case = FraudCase {
        id: req.case_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        farmer_id: req.farmer_id,
        params,
        result,
        trust_score,
        created_at: now,
        updated_at: now,
    };

    let case = state.fraud_cases.upsert(case).await?;

    tracing::info!(
        case_id = %case.id,
        fraud_score = case.result.fraud_score,
        flags = case.result.flags.len(),
        recommendation = %case.result.recommendation,
        "Fraud check completed"
    );

    Ok(Json(case))
}

/// List stored cases
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<FraudCase>>> {
    Ok(Json(state.fraud_cases.list().await?))
}

/// Get single case
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<FraudCase>> {
    let case = state
        .fraud_cases
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Fraud case not found".to_string()))?;

    Ok(Json(case))
}
