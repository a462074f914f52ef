//! Fraud Types
//!
//! Core types for fraud checks.
//! NO logic here - only data structures.

use serde::{Deserialize, Serialize};

use crate::logic::risk::IrrigationType;

// ============================================================================
// FLAGS
// ============================================================================

/// Kind of discrepancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudFlagType {
    LandMismatch,
    IrrigationMismatch,
    CropMismatch,
    ClaimAnomaly,
    /// Declared for reporting compatibility. No check produces it.
    LocationAnomaly,
}

impl FraudFlagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FraudFlagType::LandMismatch => "land_mismatch",
            FraudFlagType::IrrigationMismatch => "irrigation_mismatch",
            FraudFlagType::CropMismatch => "crop_mismatch",
            FraudFlagType::ClaimAnomaly => "claim_anomaly",
            FraudFlagType::LocationAnomaly => "location_anomaly",
        }
    }
}

impl std::fmt::Display for FraudFlagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flag severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Weight in the aggregate fraud score
    pub fn weight(&self) -> f64 {
        match self {
            Severity::Low => 10.0,
            Severity::Medium => 25.0,
            Severity::High => 40.0,
            Severity::Critical => 60.0,
        }
    }

    /// High and critical flags always need a field visit
    pub fn requires_field_visit(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What was claimed, what was verified, how they differ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub claimed: String,
    pub verified: String,
    pub discrepancy: String,
}

/// A single fraud flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudFlag {
    #[serde(rename = "type")]
    pub flag_type: FraudFlagType,
    pub severity: Severity,
    pub detail: String,
    pub evidence: Evidence,
    /// 0 - 100
    pub confidence: u8,
}

impl FraudFlag {
    /// Contribution to the aggregate fraud score
    pub fn contribution(&self) -> f64 {
        self.severity.weight() * f64::from(self.confidence) / 100.0
    }
}

// ============================================================================
// INPUT
// ============================================================================

/// Loss figure reported by a nearby farm for the same event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearbyClaim {
    pub farm_id: Option<String>,
    pub loss_percent: Option<f64>,
}

/// Everything the fraud checks look at.
///
/// Optional fields switch their check off when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudCheckParams {
    pub claimed_land_acres: f64,
    /// From land records
    pub verified_land_acres: Option<f64>,
    pub claimed_irrigation: Option<IrrigationType>,
    /// Precomputed uniformity (0.0 - 1.0)
    pub ndvi_uniformity: Option<f64>,
    /// Raw NDVI samples, used when `ndvi_uniformity` is absent
    pub ndvi_samples: Vec<f64>,
    pub claimed_crop: Option<String>,
    pub observed_ndvi: Option<f64>,
    pub claimed_loss_percent: Option<f64>,
    pub nearby_claims: Vec<NearbyClaim>,
}

// ============================================================================
// RESULT
// ============================================================================

/// Final decision on a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Approve,
    FieldVerify,
    Reject,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Approve => "approve",
            Recommendation::FieldVerify => "field_verify",
            Recommendation::Reject => "reject",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of all fraud checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudCheckResult {
    /// 0 - 100
    pub fraud_score: u8,
    pub flags: Vec<FraudFlag>,
    pub recommendation: Recommendation,
}

impl FraudCheckResult {
    pub fn has_flag(&self, flag_type: FraudFlagType) -> bool {
        self.flags.iter().any(|f| f.flag_type == flag_type)
    }

    pub fn max_severity(&self) -> Option<Severity> {
        self.flags.iter().map(|f| f.severity).max()
    }
}
