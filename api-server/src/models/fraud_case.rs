//! Fraud case model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use agririsk_core::{FraudCheckParams, FraudCheckResult};

/// Trust score of a farmer with no history
pub const DEFAULT_TRUST_SCORE: f64 = 100.0;

/// Body of `POST /api/v1/fraud/check`
#[derive(Debug, Deserialize, Validate)]
pub struct FraudCheckRequest {
    /// Re-checking an existing case replaces it
    #[validate(length(min = 1, max = 64))]
    pub case_id: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub farmer_id: Option<String>,

    #[serde(default)]
    pub params: FraudCheckParams,

    #[validate(range(min = 0.0, max = 100.0))]
    pub base_trust_score: Option<f64>,
}

/// Stored outcome of a fraud check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudCase {
    pub id: String,
    pub farmer_id: Option<String>,
    /// Params as checked, after enrichment from the farmer record
    pub params: FraudCheckParams,
    pub result: FraudCheckResult,
    pub trust_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
