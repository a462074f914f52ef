//! ML Client Types
//!
//! Wire types of the AgriRisk ML service plus the client-side result
//! wrappers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::retry::RetryState;
use crate::logic::risk::Confidence;

// ============================================================================
// REQUEST
// ============================================================================

fn default_year() -> i32 {
    2024
}

fn default_kcc_score() -> u16 {
    700
}

/// Farm features sent to `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farmer_id: Option<String>,

    // Location
    pub state: String,
    /// kharif | rabi
    pub season: String,
    #[serde(default = "default_year")]
    pub year: i32,

    // Farm characteristics
    pub crop_type: String,
    pub land_acres: f64,
    pub irrigation_type: String,
    pub water_source_count: u32,
    #[serde(default)]
    pub borewell_count: u32,
    pub borewell_depth_ft: f64,
    #[serde(default)]
    pub has_canal_access: bool,
    pub crop_count: u32,
    pub has_livestock: bool,
    pub livestock_count: u32,
    #[serde(default)]
    pub owns_tractor: bool,
    #[serde(default)]
    pub has_storage: bool,

    // Financial
    #[serde(default = "default_kcc_score")]
    pub kcc_score: u16,
    /// Percent (0 - 100)
    pub kcc_repayment_rate: f64,
    pub outstanding_debt_ratio: f64,
    pub has_insurance_history: bool,

    // Weather
    pub rainfall_deficit_percent: f64,
    pub actual_rainfall_mm: f64,
    pub heatwave_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_temperature_c: Option<f64>,
    /// 0.0 - 1.0
    pub monsoon_reliability: f64,

    // Satellite / soil
    /// 0.0 - 1.0
    pub ndvi_score: f64,
    /// Percent (0 - 100)
    pub soil_moisture_percent: f64,
    /// 0.0 - 1.0
    pub soil_fertility_index: f64,
}

/// Body of `POST /predict/batch`
#[derive(Debug, Serialize)]
pub struct BatchPredictionRequest<'a> {
    pub inputs: &'a [PredictionInput],
}

// ============================================================================
// RESPONSE
// ============================================================================

/// Envelope used by every prediction endpoint
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Per-category sub-scores (0 - 25)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MlBreakdown {
    pub weather_risk: u8,
    pub infrastructure: u8,
    pub diversification: u8,
    pub financial_health: u8,
}

impl MlBreakdown {
    pub fn values(&self) -> [(&'static str, u8); 4] {
        [
            ("weather_risk", self.weather_risk),
            ("infrastructure", self.infrastructure),
            ("diversification", self.diversification),
            ("financial_health", self.financial_health),
        ]
    }
}

/// A feature and how much it moved the score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorImpact {
    pub factor: String,
    pub impact: f64,
}

/// Where a prediction came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    #[default]
    Model,
    Fallback,
}

/// Output of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutput {
    #[serde(default)]
    pub farmer_id: Option<String>,
    /// 0 - 100, higher = safer
    pub risk_score: u8,
    pub risk_category: String,
    pub category_label: String,
    /// Percent (0 - 100)
    pub claim_probability: f64,
    pub confidence: Confidence,
    pub breakdown: MlBreakdown,
    #[serde(default)]
    pub top_risk_drivers: Option<Vec<FactorImpact>>,
    #[serde(default)]
    pub top_protective_factors: Option<Vec<FactorImpact>>,
    /// Set locally, never sent by the service
    #[serde(default)]
    pub source: PredictionSource,
}

/// Prediction plus how it was obtained
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub output: PredictionOutput,
    /// Terminal state: `Succeeded` or `FallbackUsed`
    pub state: RetryState,
    /// Remote attempts made for this item (a batch hit counts as one)
    pub attempts: u32,
}

// ============================================================================
// HEALTH
// ============================================================================

/// Body of `GET /health`
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub model_loaded: bool,
}

/// Health-check summary with latency
#[derive(Debug, Clone, Serialize)]
pub struct HealthSummary {
    pub healthy: bool,
    pub status: String,
    pub message: String,
    pub model_loaded: bool,
    pub latency_ms: u64,
    pub api_url: String,
    pub checked_at: DateTime<Utc>,
}
