//! Risk Types
//!
//! Core types for risk scoring.
//! NO logic here - only data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// IRRIGATION
// ============================================================================

/// Irrigation type declared for a farm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationType {
    Drip,
    Sprinkler,
    Canal,
    Borewell,
    Flood,
    Rainfed,
    None,
    /// Anything the lookup table does not know
    #[serde(other)]
    Unknown,
}

impl IrrigationType {
    /// Lenient parse: trims, ignores case, unknown strings map to `Unknown`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "drip" => IrrigationType::Drip,
            "sprinkler" => IrrigationType::Sprinkler,
            "canal" => IrrigationType::Canal,
            "borewell" => IrrigationType::Borewell,
            "flood" => IrrigationType::Flood,
            "rainfed" => IrrigationType::Rainfed,
            "none" => IrrigationType::None,
            _ => IrrigationType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationType::Drip => "drip",
            IrrigationType::Sprinkler => "sprinkler",
            IrrigationType::Canal => "canal",
            IrrigationType::Borewell => "borewell",
            IrrigationType::Flood => "flood",
            IrrigationType::Rainfed => "rainfed",
            IrrigationType::None => "none",
            IrrigationType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for IrrigationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RISK INPUTS
// ============================================================================

/// Weather block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherInputs {
    /// Rainfall deficit vs. normal, in percent
    pub rainfall_deficit: f64,
    /// Days above heatwave threshold this season
    pub heatwave_days: f64,
    /// Monsoon reliability (0.0 - 1.0)
    pub monsoon_reliability: f64,
}

/// Infrastructure block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfrastructureInputs {
    pub irrigation_type: Option<IrrigationType>,
    pub water_source_count: f64,
    /// Borewell depth in feet
    pub borewell_depth: f64,
}

/// Diversification block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversificationInputs {
    pub crop_count: f64,
    pub has_livestock: bool,
    pub land_acres: f64,
}

/// Financial block (KCC-derived)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialInputs {
    /// KCC repayment rate in percent (0 - 100)
    pub repayment_rate: f64,
    pub outstanding_debt_ratio: f64,
    pub has_insurance: bool,
}

/// Everything the scorer looks at.
///
/// Built fresh per request from caller-supplied and enriched fields.
/// Missing fields deserialize to zero/false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskInputs {
    pub weather: WeatherInputs,
    pub infrastructure: InfrastructureInputs,
    pub diversification: DiversificationInputs,
    pub financial: FinancialInputs,
}

// ============================================================================
// RISK RESULT
// ============================================================================

/// Confidence in the score, based on data completeness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Risk category (higher score = safer farm)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Four sub-scores, each 0 - 25
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    /// Lower is better
    pub weather_risk: u8,
    pub infrastructure: u8,
    pub diversification: u8,
    pub financial_health: u8,
}

/// Result of risk scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    /// 0 - 100, higher = safer
    pub final_score: u8,
    pub breakdown: RiskBreakdown,
    pub confidence: Confidence,
    pub risk_category: RiskCategory,
    pub category_label: String,
}
