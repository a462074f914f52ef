//! Fraud Checker
//!
//! ONLY check logic - no types, no thresholds.
//! Input: FraudCheckParams
//! Output: FraudCheckResult

use super::ndvi::calculate_ndvi_uniformity;
use super::rules::{
    crop_ndvi_range, FraudThresholds, CLAIM_CONFIDENCE, CROP_CONFIDENCE, FRAUD_SCORE_MAX,
    IRRIGATION_CONFIDENCE, LAND_CONFIDENCE,
};
use super::types::{
    Evidence, FraudCheckParams, FraudCheckResult, FraudFlag, FraudFlagType, NearbyClaim,
    Recommendation, Severity,
};
use crate::logic::risk::IrrigationType;

// ============================================================================
// MAIN CHECK FUNCTION
// ============================================================================

/// Run every check with default thresholds
pub fn detect_fraud(params: &FraudCheckParams) -> FraudCheckResult {
    detect_fraud_with_thresholds(params, &FraudThresholds::default())
}

/// Run every check with custom thresholds
pub fn detect_fraud_with_thresholds(params: &FraudCheckParams, thresholds: &FraudThresholds) -> FraudCheckResult {
    let flags: Vec<FraudFlag> = [
        check_land(params, thresholds),
        check_irrigation(params, thresholds),
        check_crop(params, thresholds),
        check_claim(params, thresholds),
    ]
    .into_iter()
    .flatten()
    .collect();

    let fraud_score = aggregate_score(&flags);
    let recommendation = recommend(fraud_score, &flags, thresholds);

    if !flags.is_empty() {
        log::debug!(
            "Fraud check raised {} flag(s), score {}, recommendation {}",
            flags.len(),
            fraud_score,
            recommendation
        );
    }

    FraudCheckResult {
        fraud_score,
        flags,
        recommendation,
    }
}

// ============================================================================
// CHECKS
// ============================================================================

/// Land mismatch: claimed acreage vs. land records
fn check_land(params: &FraudCheckParams, thresholds: &FraudThresholds) -> Option<FraudFlag> {
    let verified = params.verified_land_acres.filter(|v| *v > 0.0)?;
    let claimed = params.claimed_land_acres;
    let ratio = claimed / verified;

    if ratio <= thresholds.land_ratio_flag {
        return None;
    }

    let severity = if ratio > thresholds.land_ratio_critical {
        Severity::Critical
    } else if ratio > thresholds.land_ratio_high {
        Severity::High
    } else {
        Severity::Medium
    };

    let excess_percent = ((claimed - verified) / verified * 100.0).trunc();

    Some(FraudFlag {
        flag_type: FraudFlagType::LandMismatch,
        severity,
        detail: format!("Claimed land exceeds verified records by {:.0}%", excess_percent),
        evidence: Evidence {
            claimed: format!("{:.2} acres", claimed),
            verified: format!("{:.2} acres", verified),
            discrepancy: format!("{:.0}% over verified area ({:.2}x)", excess_percent, ratio),
        },
        confidence: LAND_CONFIDENCE,
    })
}

/// Irrigation mismatch: drip claimed but canopy is patchy
fn check_irrigation(params: &FraudCheckParams, thresholds: &FraudThresholds) -> Option<FraudFlag> {
    if params.claimed_irrigation != Some(IrrigationType::Drip) {
        return None;
    }

    let uniformity = match params.ndvi_uniformity {
        Some(u) => u,
        None if !params.ndvi_samples.is_empty() => calculate_ndvi_uniformity(&params.ndvi_samples),
        None => return None,
    };

    if uniformity >= thresholds.drip_uniformity_min {
        return None;
    }

    Some(FraudFlag {
        flag_type: FraudFlagType::IrrigationMismatch,
        severity: Severity::Medium,
        detail: "Drip irrigation claimed but satellite canopy is uneven".to_string(),
        evidence: Evidence {
            claimed: "drip".to_string(),
            verified: format!("NDVI uniformity {:.2}", uniformity),
            discrepancy: format!(
                "Uniformity {:.2} below {:.2} expected for drip",
                uniformity, thresholds.drip_uniformity_min
            ),
        },
        confidence: IRRIGATION_CONFIDENCE,
    })
}

/// Crop mismatch: observed NDVI far below what the claimed crop shows
fn check_crop(params: &FraudCheckParams, thresholds: &FraudThresholds) -> Option<FraudFlag> {
    let crop = params.claimed_crop.as_deref()?;
    let observed = params.observed_ndvi?;

    let expected = crop_ndvi_range(crop);
    let floor = expected.min * thresholds.crop_ndvi_factor;

    if observed >= floor {
        return None;
    }

    Some(FraudFlag {
        flag_type: FraudFlagType::CropMismatch,
        severity: Severity::Medium,
        detail: format!("Vegetation signal does not match a {} crop", crop.trim().to_lowercase()),
        evidence: Evidence {
            claimed: crop.to_string(),
            verified: format!("NDVI {:.2}", observed),
            discrepancy: format!(
                "NDVI {:.2} below {:.2} (expected {:.2}-{:.2})",
                observed, floor, expected.min, expected.max
            ),
        },
        confidence: CROP_CONFIDENCE,
    })
}

/// Claim anomaly: loss far above what neighbours reported
fn check_claim(params: &FraudCheckParams, thresholds: &FraudThresholds) -> Option<FraudFlag> {
    let claimed_loss = params.claimed_loss_percent?;

    let reported: Vec<f64> = params
        .nearby_claims
        .iter()
        .filter_map(|c: &NearbyClaim| c.loss_percent)
        .collect();
    if reported.len() < thresholds.claim_min_neighbors {
        return None;
    }

    let valid: Vec<f64> = reported
        .into_iter()
        .filter(|loss| loss.is_finite() && (0.0..=100.0).contains(loss))
        .collect();
    if valid.len() < thresholds.claim_min_valid {
        return None;
    }

    let neighbor_avg = valid.iter().sum::<f64>() / valid.len() as f64;

    if claimed_loss <= neighbor_avg * thresholds.claim_loss_multiplier
        || claimed_loss <= thresholds.claim_loss_min_percent
    {
        return None;
    }

    Some(FraudFlag {
        flag_type: FraudFlagType::ClaimAnomaly,
        severity: Severity::High,
        detail: format!(
            "Claimed loss {:.0}% is far above the {:.0}% average of {} nearby farms",
            claimed_loss,
            neighbor_avg,
            valid.len()
        ),
        evidence: Evidence {
            claimed: format!("{:.1}% loss", claimed_loss),
            verified: format!("{:.1}% nearby average", neighbor_avg),
            discrepancy: if neighbor_avg > 0.0 {
                format!("{:.1}x the nearby average", claimed_loss / neighbor_avg)
            } else {
                "no loss reported nearby".to_string()
            },
        },
        confidence: CLAIM_CONFIDENCE,
    })
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Sum of severity-weighted, confidence-scaled contributions, capped at 100
fn aggregate_score(flags: &[FraudFlag]) -> u8 {
    let total: f64 = flags.iter().map(FraudFlag::contribution).sum();
    total.min(FRAUD_SCORE_MAX).round() as u8
}

fn recommend(fraud_score: u8, flags: &[FraudFlag], thresholds: &FraudThresholds) -> Recommendation {
    if fraud_score > thresholds.reject_above {
        Recommendation::Reject
    } else if fraud_score > thresholds.field_verify_above
        || flags.iter().any(|f| f.severity.requires_field_visit())
    {
        Recommendation::FieldVerify
    } else {
        Recommendation::Approve
    }
}

// ============================================================================
// TESTS
// ============================================================================
