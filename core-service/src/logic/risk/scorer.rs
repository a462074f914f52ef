//! Risk Scorer
//!
//! ONLY scoring logic - no types, no pricing.
//! Input: RiskInputs
//! Output: RiskResult

use super::rules::*;
use super::types::{
    Confidence, DiversificationInputs, FinancialInputs, InfrastructureInputs, RiskBreakdown,
    RiskCategory, RiskInputs, RiskResult, WeatherInputs,
};

// ============================================================================
// MAIN SCORING FUNCTION
// ============================================================================

/// Main scoring function
///
/// Deterministic and explainable. Never fails: odd inputs flow through
/// the arithmetic and the results are clamped, not rejected.
pub fn calculate_risk_score(inputs: &RiskInputs) -> RiskResult {
    let weather_risk = weather_risk(&inputs.weather);
    let infrastructure = infrastructure_score(&inputs.infrastructure);
    let diversification = diversification_score(&inputs.diversification);
    let financial_health = financial_health_score(&inputs.financial);

    let combined = infrastructure + diversification + financial_health - weather_risk + FINAL_SCORE_OFFSET;
    let final_score = to_score(combined.round(), FINAL_SCORE_MAX);

    RiskResult {
        final_score,
        breakdown: RiskBreakdown {
            weather_risk: to_score(weather_risk.round(), SUB_SCORE_MAX),
            infrastructure: to_score(infrastructure.round(), SUB_SCORE_MAX),
            diversification: to_score(diversification.round(), SUB_SCORE_MAX),
            financial_health: to_score(financial_health.round(), SUB_SCORE_MAX),
        },
        confidence: confidence_for(inputs),
        risk_category: category_for_score(final_score),
        category_label: category_label_for_score(final_score).to_string(),
    }
}

// ============================================================================
// SUB-SCORES (each 0 - 25)
// ============================================================================

/// Weather risk - lower is better, subtracted from the final score
pub fn weather_risk(weather: &WeatherInputs) -> f64 {
    let score = WEATHER_BASE
        - weather.monsoon_reliability * MONSOON_RELIABILITY_WEIGHT
        + weather.rainfall_deficit / RAINFALL_DEFICIT_DIVISOR
        + weather.heatwave_days * HEATWAVE_DAY_WEIGHT;
    clamp_sub_score(score)
}

/// Infrastructure - higher is better
pub fn infrastructure_score(infra: &InfrastructureInputs) -> f64 {
    let irrigation = infra.irrigation_type.map(irrigation_points).unwrap_or(0.0);
    let water = (infra.water_source_count * WATER_SOURCE_POINTS).min(WATER_SOURCE_CAP);
    let borewell = (infra.borewell_depth / BOREWELL_DEPTH_DIVISOR).min(BOREWELL_DEPTH_CAP);
    clamp_sub_score(irrigation + water + borewell)
}

/// Diversification - higher is better
pub fn diversification_score(div: &DiversificationInputs) -> f64 {
    let mut score = (div.crop_count * CROP_POINTS).min(CROP_CAP);
    if div.has_livestock {
        score += LIVESTOCK_BONUS;
    }
    score += (div.land_acres * LAND_ACRE_POINTS).min(LAND_CAP);
    clamp_sub_score(score)
}

/// Financial health - higher is better
pub fn financial_health_score(fin: &FinancialInputs) -> f64 {
    let mut score = fin.repayment_rate / REPAYMENT_DIVISOR - fin.outstanding_debt_ratio * DEBT_RATIO_WEIGHT;
    if fin.has_insurance {
        score += INSURANCE_BONUS;
    }
    clamp_sub_score(score)
}

// ============================================================================
// DERIVED FIELDS
// ============================================================================

/// Confidence from data completeness
pub fn confidence_for(inputs: &RiskInputs) -> Confidence {
    let has_irrigation = inputs.infrastructure.irrigation_type.is_some();
    let has_repayment = inputs.financial.repayment_rate > 0.0;

    match (has_irrigation, has_repayment) {
        (true, true) => Confidence::High,
        (true, false) => Confidence::Medium,
        _ => Confidence::Low,
    }
}

/// Category from final score
pub fn category_for_score(score: u8) -> RiskCategory {
    if score >= LOW_RISK_THRESHOLD {
        RiskCategory::Low
    } else if score >= MEDIUM_RISK_THRESHOLD {
        RiskCategory::Medium
    } else {
        RiskCategory::High
    }
}

/// Human-readable label, with a critical tier below the high-risk band
pub fn category_label_for_score(score: u8) -> &'static str {
    match category_for_score(score) {
        RiskCategory::Low => "Low Risk (Safe)",
        RiskCategory::Medium => "Moderate Risk",
        RiskCategory::High if score >= CRITICAL_LABEL_THRESHOLD => "High Risk",
        RiskCategory::High => "Critical Risk",
    }
}

fn clamp_sub_score(score: f64) -> f64 {
    score.clamp(0.0, SUB_SCORE_MAX)
}

/// Clamp into [0, max] and narrow. NaN lands on 0.
fn to_score(value: f64, max: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, max) as u8
}

// ============================================================================
// TESTS
// ============================================================================
