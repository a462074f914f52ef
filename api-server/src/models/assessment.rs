//! Risk assessment models

use serde::{Deserialize, Serialize};
use validator::Validate;

use agririsk_core::{FarmerRecord, PremiumQuote, RiskInputs, RiskResult, Suggestion};

/// Body of `POST /api/v1/risk/assessment`
#[derive(Debug, Deserialize, Validate)]
pub struct AssessmentRequest {
    /// Looked up to enrich the financial block
    #[validate(length(min = 1, max = 64))]
    pub farmer_id: Option<String>,

    #[serde(default)]
    pub inputs: RiskInputs,

    #[validate(range(min = 0.0))]
    pub sum_insured: f64,

    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub district_avg_premium: f64,
}

#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    /// Set when `farmer_id` resolved
    pub farmer: Option<FarmerRecord>,
    pub risk: RiskResult,
    pub premium: PremiumQuote,
    pub suggestions: Vec<Suggestion>,
}

/// Body of `POST /api/v1/premium`
#[derive(Debug, Deserialize, Validate)]
pub struct PremiumRequest {
    #[validate(range(max = 100))]
    pub risk_score: u8,

    #[validate(range(min = 0.0))]
    pub sum_insured: f64,

    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub district_avg_premium: f64,
}
