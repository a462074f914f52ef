//! Premium Pricing
//!
//! Maps a risk score onto a recommended premium and compares it with the
//! district average.

use serde::{Deserialize, Serialize};

use super::rules::{BASE_PREMIUM_RATE, PREMIUM_SCALE_ORIGIN};

/// Recommended premium and savings vs. district average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumQuote {
    pub risk_score: u8,
    pub sum_insured: f64,
    pub recommended_premium: f64,
    pub district_avg_premium: f64,
    pub savings: f64,
    /// Rounded percent of the district average saved
    pub savings_percent: f64,
}

/// Premium = sum_insured * 3% * (2 - score / 100), rounded.
///
/// A safer farm (higher score) pays less. Savings never go negative.
pub fn calculate_premium(risk_score: u8, sum_insured: f64, district_avg_premium: f64) -> PremiumQuote {
    let multiplier = PREMIUM_SCALE_ORIGIN - f64::from(risk_score) / 100.0;
    let recommended_premium = (sum_insured * BASE_PREMIUM_RATE * multiplier).round();

    let savings = (district_avg_premium - recommended_premium).max(0.0);
    let savings_percent = if district_avg_premium > 0.0 {
        (savings / district_avg_premium * 100.0).round()
    } else {
        0.0
    };

    PremiumQuote {
        risk_score,
        sum_insured,
        recommended_premium,
        district_avg_premium,
        savings,
        savings_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premium_at_mid_score() {
        let quote = calculate_premium(50, 200_000.0, 5_000.0);
        assert_eq!(quote.recommended_premium, 9_000.0);
        assert_eq!(quote.savings, 0.0);
        assert_eq!(quote.savings_percent, 0.0);
    }

    #[test]
    fn test_safe_farm_saves() {
        // 100_000 * 0.03 * (2 - 0.9) = 3_300
        let quote = calculate_premium(90, 100_000.0, 5_000.0);
        assert_eq!(quote.recommended_premium, 3_300.0);
        assert_eq!(quote.savings, 1_700.0);
        assert_eq!(quote.savings_percent, 34.0);
    }

    #[test]
    fn test_higher_score_never_costs_more() {
        let mut previous = f64::MAX;
        for score in 0..=100u8 {
            let premium = calculate_premium(score, 150_000.0, 4_000.0).recommended_premium;
            assert!(premium <= previous);
            previous = premium;
        }
    }

    #[test]
    fn test_zero_district_average() {
        let quote = calculate_premium(80, 100_000.0, 0.0);
        assert_eq!(quote.savings, 0.0);
        assert_eq!(quote.savings_percent, 0.0);
    }
}
