//! Local Fallback
//!
//! Rule-based stand-in for the ML model: maps the request onto
//! `RiskInputs` and runs the local scorer. Used when the service stays
//! unreachable after all retries.

use super::types::{FactorImpact, MlBreakdown, PredictionInput, PredictionOutput, PredictionSource};
use crate::logic::risk::{
    calculate_risk_score, DiversificationInputs, FinancialInputs, InfrastructureInputs,
    IrrigationType, RiskBreakdown, RiskInputs, WeatherInputs,
};

/// Sub-score midpoint: below = driver, above = protective
const NEUTRAL_SUB_SCORE: f64 = 12.5;
const TOP_FACTORS: usize = 3;

/// Request -> scorer inputs
pub fn to_risk_inputs(input: &PredictionInput) -> RiskInputs {
    let irrigation_type = if input.irrigation_type.trim().is_empty() {
        None
    } else {
        Some(IrrigationType::parse(&input.irrigation_type))
    };

    RiskInputs {
        weather: WeatherInputs {
            rainfall_deficit: input.rainfall_deficit_percent,
            heatwave_days: f64::from(input.heatwave_days),
            monsoon_reliability: input.monsoon_reliability,
        },
        infrastructure: InfrastructureInputs {
            irrigation_type,
            water_source_count: f64::from(input.water_source_count),
            borewell_depth: input.borewell_depth_ft,
        },
        diversification: DiversificationInputs {
            crop_count: f64::from(input.crop_count),
            has_livestock: input.has_livestock,
            land_acres: input.land_acres,
        },
        financial: FinancialInputs {
            repayment_rate: input.kcc_repayment_rate,
            outstanding_debt_ratio: input.outstanding_debt_ratio,
            has_insurance: input.has_insurance_history,
        },
    }
}

/// Score the request locally, shaped like a service response
pub fn local_prediction(input: &PredictionInput) -> PredictionOutput {
    let result = calculate_risk_score(&to_risk_inputs(input));
    let (drivers, protective) = rank_factors(&result.breakdown);

    PredictionOutput {
        farmer_id: input.farmer_id.clone(),
        risk_score: result.final_score,
        risk_category: result.risk_category.as_str().to_string(),
        category_label: result.category_label,
        claim_probability: f64::from(100 - result.final_score),
        confidence: result.confidence,
        breakdown: MlBreakdown {
            weather_risk: result.breakdown.weather_risk,
            infrastructure: result.breakdown.infrastructure,
            diversification: result.breakdown.diversification,
            financial_health: result.breakdown.financial_health,
        },
        top_risk_drivers: Some(drivers),
        top_protective_factors: Some(protective),
        source: PredictionSource::Fallback,
    }
}

/// Split the breakdown into weak (drivers) and strong (protective) areas.
///
/// Impact is distance from the midpoint, scaled to [0, 1].
fn rank_factors(breakdown: &RiskBreakdown) -> (Vec<FactorImpact>, Vec<FactorImpact>) {
    // weather_risk is inverted so every entry reads "higher = healthier"
    let health = [
        ("weather", 25.0 - f64::from(breakdown.weather_risk)),
        ("infrastructure", f64::from(breakdown.infrastructure)),
        ("diversification", f64::from(breakdown.diversification)),
        ("financial_health", f64::from(breakdown.financial_health)),
    ];

    let mut drivers = Vec::new();
    let mut protective = Vec::new();
    for (factor, value) in health {
        let impact = ((value - NEUTRAL_SUB_SCORE) / NEUTRAL_SUB_SCORE * 1000.0).round() / 1000.0;
        let entry = FactorImpact {
            factor: factor.to_string(),
            impact: impact.abs(),
        };
        if impact < 0.0 {
            drivers.push(entry);
        } else if impact > 0.0 {
            protective.push(entry);
        }
    }

    for list in [&mut drivers, &mut protective] {
        list.sort_by(|a, b| b.impact.total_cmp(&a.impact));
        list.truncate(TOP_FACTORS);
    }

    (drivers, protective)
}
