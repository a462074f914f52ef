//! Fraud Rules & Thresholds
//!
//! Thresholds for the fraud checks and the crop NDVI table.
//! NO check logic here - only constants and config.

use serde::{Deserialize, Serialize};

// ============================================================================
// LAND
// ============================================================================

/// Claimed / verified ratio above this = flag
pub const LAND_RATIO_FLAG: f64 = 1.15;
/// Above this = High
pub const LAND_RATIO_HIGH: f64 = 1.5;
/// Above this = Critical
pub const LAND_RATIO_CRITICAL: f64 = 2.0;
pub const LAND_CONFIDENCE: u8 = 95;

// ============================================================================
// SATELLITE (NDVI)
// ============================================================================

/// Real drip irrigation gives an even canopy; below this it is doubtful
pub const DRIP_UNIFORMITY_MIN: f64 = 0.6;
pub const IRRIGATION_CONFIDENCE: u8 = 75;

/// Observed NDVI below this fraction of the crop minimum = flag
pub const CROP_NDVI_FACTOR: f64 = 0.7;
pub const CROP_CONFIDENCE: u8 = 65;

// ============================================================================
// CLAIMS
// ============================================================================

/// Nearby records with a loss figure needed before comparing
pub const CLAIM_MIN_NEIGHBORS: usize = 5;
/// Of those, how many must be valid
pub const CLAIM_MIN_VALID: usize = 3;
/// Claimed loss above this multiple of the neighbour average = flag
pub const CLAIM_LOSS_MULTIPLIER: f64 = 2.0;
/// ...and above this absolute percent
pub const CLAIM_LOSS_MIN_PERCENT: f64 = 30.0;
pub const CLAIM_CONFIDENCE: u8 = 80;

// ============================================================================
// AGGREGATION
// ============================================================================

pub const FRAUD_SCORE_MAX: f64 = 100.0;
/// Above this = Reject
pub const REJECT_THRESHOLD: u8 = 60;
/// Above this = Field verify
pub const FIELD_VERIFY_THRESHOLD: u8 = 30;

// ============================================================================
// CROP NDVI TABLE
// ============================================================================

/// Expected NDVI band for a healthy crop mid-season
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NdviRange {
    pub min: f64,
    pub max: f64,
}

/// Used for crops missing from the table
pub const DEFAULT_NDVI_RANGE: NdviRange = NdviRange { min: 0.3, max: 0.8 };

pub const CROP_NDVI_RANGES: [(&str, NdviRange); 7] = [
    ("cotton", NdviRange { min: 0.35, max: 0.8 }),
    ("wheat", NdviRange { min: 0.4, max: 0.85 }),
    ("rice", NdviRange { min: 0.5, max: 0.9 }),
    ("soybean", NdviRange { min: 0.4, max: 0.85 }),
    ("sugarcane", NdviRange { min: 0.55, max: 0.9 }),
    ("maize", NdviRange { min: 0.45, max: 0.85 }),
    ("pulses", NdviRange { min: 0.3, max: 0.75 }),
];

/// Look up the NDVI band for a crop name (case-insensitive)
pub fn crop_ndvi_range(crop: &str) -> NdviRange {
    let crop = crop.trim().to_lowercase();
    CROP_NDVI_RANGES
        .iter()
        .find(|(name, _)| *name == crop)
        .map(|(_, range)| *range)
        .unwrap_or(DEFAULT_NDVI_RANGE)
}

// ============================================================================
// CONFIGURABLE THRESHOLDS (for runtime adjustment)
// ============================================================================

/// Thresholds for the fraud checks (configurable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudThresholds {
    pub land_ratio_flag: f64,
    pub land_ratio_high: f64,
    pub land_ratio_critical: f64,
    pub drip_uniformity_min: f64,
    pub crop_ndvi_factor: f64,
    pub claim_min_neighbors: usize,
    pub claim_min_valid: usize,
    pub claim_loss_multiplier: f64,
    pub claim_loss_min_percent: f64,
    pub reject_above: u8,
    pub field_verify_above: u8,
}

impl Default for FraudThresholds {
    fn default() -> Self {
        Self {
            land_ratio_flag: LAND_RATIO_FLAG,
            land_ratio_high: LAND_RATIO_HIGH,
            land_ratio_critical: LAND_RATIO_CRITICAL,
            drip_uniformity_min: DRIP_UNIFORMITY_MIN,
            crop_ndvi_factor: CROP_NDVI_FACTOR,
            claim_min_neighbors: CLAIM_MIN_NEIGHBORS,
            claim_min_valid: CLAIM_MIN_VALID,
            claim_loss_multiplier: CLAIM_LOSS_MULTIPLIER,
            claim_loss_min_percent: CLAIM_LOSS_MIN_PERCENT,
            reject_above: REJECT_THRESHOLD,
            field_verify_above: FIELD_VERIFY_THRESHOLD,
        }
    }
}

impl FraudThresholds {
    /// Stricter satellite checks, for districts with known claim rings
    pub fn strict() -> Self {
        Self {
            land_ratio_flag: 1.1,
            drip_uniformity_min: 0.7,
            crop_ndvi_factor: 0.8,
            ..Default::default()
        }
    }
}
