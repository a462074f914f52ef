//! Risk scoring handlers

use axum::{extract::State, Json};
use validator::Validate;

use agririsk_core::{
    calculate_premium, calculate_risk_score, generate_suggestions, PremiumQuote, RiskInputs,
    RiskResult,
};

use crate::models::{AssessmentRequest, AssessmentResponse, PremiumRequest};
use crate::{AppResult, AppState};

/// Score raw inputs
pub async fn score(Json(inputs): Json<RiskInputs>) -> Json<RiskResult> {
    Json(calculate_risk_score(&inputs))
}

/// Score + premium + suggestions, enriched from the farmer record
pub async fn assessment(
    State(state): State<AppState>,
    Json(req): Json<AssessmentRequest>,
) -> AppResult<Json<AssessmentResponse>> {
    req.validate()?;

    let mut inputs = req.inputs;
    let farmer = req
        .farmer_id
        .as_deref()
        .and_then(|id| state.farmers.find_by_id(id));

    match (&farmer, &req.farmer_id) {
        (Some(record), _) => record.apply_financials(&mut inputs),
        (None, Some(id)) => tracing::warn!("Farmer {} not found, scoring request data only", id),
        (None, None) => {}
    }

    let risk = calculate_risk_score(&inputs);
    let premium = calculate_premium(risk.final_score, req.sum_insured, req.district_avg_premium);
    let suggestions = generate_suggestions(&inputs, &risk, req.sum_insured);

    tracing::info!(
        farmer_id = ?req.farmer_id,
        score = risk.final_score,
        category = %risk.risk_category,
        "Risk assessment completed"
    );

    Ok(Json(AssessmentResponse {
        farmer,
        risk,
        premium,
        suggestions,
    }))
}

/// Premium quote for a known score
pub async fn premium(Json(req): Json<PremiumRequest>) -> AppResult<Json<PremiumQuote>> {
    req.validate()?;
    Ok(Json(calculate_premium(req.risk_score, req.sum_insured, req.district_avg_premium)))
}
