//! Risk Scoring Rules & Thresholds
//!
//! Lookup tables and constants for the risk scorer.
//! NO scoring logic here - only constants.

use super::types::IrrigationType;

// ============================================================================
// SUB-SCORE RANGE
// ============================================================================

/// Every sub-score is clamped to [0, SUB_SCORE_MAX]
pub const SUB_SCORE_MAX: f64 = 25.0;

/// Final score is clamped to [0, FINAL_SCORE_MAX]
pub const FINAL_SCORE_MAX: f64 = 100.0;

/// Offset added when combining the sub-scores
pub const FINAL_SCORE_OFFSET: f64 = 50.0;

// ============================================================================
// WEATHER
// ============================================================================

pub const WEATHER_BASE: f64 = 25.0;
pub const MONSOON_RELIABILITY_WEIGHT: f64 = 10.0;
/// Rainfall deficit percent is divided by this
pub const RAINFALL_DEFICIT_DIVISOR: f64 = 10.0;
pub const HEATWAVE_DAY_WEIGHT: f64 = 0.5;

// ============================================================================
// INFRASTRUCTURE
// ============================================================================

pub const WATER_SOURCE_POINTS: f64 = 5.0;
pub const WATER_SOURCE_CAP: f64 = 10.0;
/// Borewell depth (ft) is divided by this
pub const BOREWELL_DEPTH_DIVISOR: f64 = 100.0;
pub const BOREWELL_DEPTH_CAP: f64 = 5.0;

/// Points awarded per irrigation type.
///
/// Exhaustive match, so a new variant cannot slip through unscored.
pub const fn irrigation_points(irrigation: IrrigationType) -> f64 {
    match irrigation {
        IrrigationType::Drip => 10.0,
        IrrigationType::Sprinkler => 8.0,
        IrrigationType::Canal => 6.0,
        IrrigationType::Borewell => 5.0,
        IrrigationType::Flood => 4.0,
        IrrigationType::Rainfed | IrrigationType::None | IrrigationType::Unknown => 0.0,
    }
}

// ============================================================================
// DIVERSIFICATION
// ============================================================================

pub const CROP_POINTS: f64 = 8.0;
pub const CROP_CAP: f64 = 16.0;
pub const LIVESTOCK_BONUS: f64 = 5.0;
pub const LAND_ACRE_POINTS: f64 = 0.5;
pub const LAND_CAP: f64 = 4.0;

// ============================================================================
// FINANCIAL HEALTH
// ============================================================================

/// Repayment rate percent is divided by this
pub const REPAYMENT_DIVISOR: f64 = 4.0;
pub const DEBT_RATIO_WEIGHT: f64 = 10.0;
pub const INSURANCE_BONUS: f64 = 3.0;

// ============================================================================
// CATEGORIES
// ============================================================================

/// At or above this score = Low risk
pub const LOW_RISK_THRESHOLD: u8 = 70;

/// At or above this score = Medium risk, below = High
pub const MEDIUM_RISK_THRESHOLD: u8 = 40;

/// Below this score the label reads "Critical Risk" (category stays High)
pub const CRITICAL_LABEL_THRESHOLD: u8 = 25;

// ============================================================================
// PRICING
// ============================================================================

/// Base premium rate on sum insured
pub const BASE_PREMIUM_RATE: f64 = 0.03;

/// Premium multiplier is (PREMIUM_SCALE_ORIGIN - score / 100)
pub const PREMIUM_SCALE_ORIGIN: f64 = 2.0;
