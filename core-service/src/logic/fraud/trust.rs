//! Trust Score Adjustment
//!
//! A farmer's trust score drops with every flag raised against them and
//! recovers a little when their past claims have held up.

use super::types::{FraudFlag, Severity};

pub const TRUST_SCORE_MAX: f64 = 100.0;

/// Historical claims accuracy (percent) that earns the bonus
pub const ACCURACY_BONUS_THRESHOLD: f64 = 90.0;
pub const ACCURACY_BONUS: f64 = 5.0;

/// Penalty per flag
pub fn severity_penalty(severity: Severity) -> f64 {
    match severity {
        Severity::Low => 2.0,
        Severity::Medium => 5.0,
        Severity::High => 10.0,
        Severity::Critical => 20.0,
    }
}

/// Apply flag penalties and the accuracy bonus, clamp to [0, 100]
pub fn adjust_trust_score(current: f64, flags: &[FraudFlag], historical_accuracy: Option<f64>) -> f64 {
    let penalty: f64 = flags.iter().map(|f| severity_penalty(f.severity)).sum();
    let bonus = match historical_accuracy {
        Some(accuracy) if accuracy >= ACCURACY_BONUS_THRESHOLD => ACCURACY_BONUS,
        _ => 0.0,
    };

    let adjusted = current - penalty + bonus;
    if adjusted.is_nan() {
        return 0.0;
    }
    adjusted.clamp(0.0, TRUST_SCORE_MAX)
}
