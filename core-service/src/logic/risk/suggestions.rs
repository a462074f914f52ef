//! Improvement Suggestions
//!
//! Fixed, ordered rule list. Each rule fires on a threshold over the
//! current inputs and carries a static payload (score gain, cost,
//! subsidy scheme). Premium savings are priced with the same formula
//! used for quotes.

use serde::{Deserialize, Serialize};

use super::pricing::calculate_premium;
use super::rules::{irrigation_points, FINAL_SCORE_MAX};
use super::types::{IrrigationType, RiskInputs, RiskResult};

/// Which rule produced the suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    IrrigationUpgrade,
    SecondaryWaterSource,
    CropDiversification,
    LivestockAddition,
}

/// Government subsidy attached to a suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsidyInfo {
    pub scheme: String,
    pub subsidy_percent: f64,
    /// Farmer's share after subsidy
    pub net_cost: f64,
}

/// Actionable improvement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub score_increase: u8,
    pub premium_savings: f64,
    pub estimated_cost: f64,
    pub subsidy: Option<SubsidyInfo>,
    /// 1 = do this first
    pub priority_rank: u8,
}

struct SuggestionRule {
    kind: SuggestionKind,
    title: &'static str,
    description: &'static str,
    score_increase: u8,
    estimated_cost: f64,
    subsidy: Option<(&'static str, f64)>,
    applies: fn(&RiskInputs) -> bool,
}

/// Rules in priority order
const RULES: [SuggestionRule; 4] = [
    SuggestionRule {
        kind: SuggestionKind::IrrigationUpgrade,
        title: "Upgrade to drip irrigation",
        description: "Drip irrigation cuts water use and protects yield in deficit years.",
        score_increase: 8,
        estimated_cost: 50_000.0,
        subsidy: Some(("PMKSY - Per Drop More Crop", 55.0)),
        applies: needs_irrigation_upgrade,
    },
    SuggestionRule {
        kind: SuggestionKind::SecondaryWaterSource,
        title: "Add a secondary water source",
        description: "A farm pond or second borewell keeps crops watered when one source fails.",
        score_increase: 5,
        estimated_cost: 25_000.0,
        subsidy: Some(("MGNREGA Farm Pond", 50.0)),
        applies: needs_water_source,
    },
    SuggestionRule {
        kind: SuggestionKind::CropDiversification,
        title: "Diversify crops",
        description: "Growing a second crop spreads weather and price risk.",
        score_increase: 8,
        estimated_cost: 5_000.0,
        subsidy: Some(("NFSM Seed Subsidy", 50.0)),
        applies: needs_diversification,
    },
    SuggestionRule {
        kind: SuggestionKind::LivestockAddition,
        title: "Add livestock",
        description: "Dairy or poultry income cushions the household against crop loss.",
        score_increase: 5,
        estimated_cost: 30_000.0,
        subsidy: Some(("National Livestock Mission", 50.0)),
        applies: needs_livestock,
    },
];

fn needs_irrigation_upgrade(inputs: &RiskInputs) -> bool {
    let current = inputs
        .infrastructure
        .irrigation_type
        .map(irrigation_points)
        .unwrap_or(0.0);
    current < irrigation_points(IrrigationType::Sprinkler)
}

fn needs_water_source(inputs: &RiskInputs) -> bool {
    inputs.infrastructure.water_source_count < 2.0
}

fn needs_diversification(inputs: &RiskInputs) -> bool {
    inputs.diversification.crop_count < 2.0
}

fn needs_livestock(inputs: &RiskInputs) -> bool {
    !inputs.diversification.has_livestock
}

/// Generate suggestions for a scored farm, ordered by `priority_rank`.
///
/// `sum_insured` prices the premium savings of each score gain.
pub fn generate_suggestions(inputs: &RiskInputs, result: &RiskResult, sum_insured: f64) -> Vec<Suggestion> {
    let current_premium = calculate_premium(result.final_score, sum_insured, 0.0).recommended_premium;

    RULES
        .iter()
        .filter(|rule| (rule.applies)(inputs))
        .enumerate()
        .map(|(index, rule)| {
            let improved_score = (f64::from(result.final_score) + f64::from(rule.score_increase))
                .min(FINAL_SCORE_MAX) as u8;
            let improved_premium = calculate_premium(improved_score, sum_insured, 0.0).recommended_premium;

            Suggestion {
                kind: rule.kind,
                title: rule.title.to_string(),
                description: rule.description.to_string(),
                score_increase: rule.score_increase,
                premium_savings: (current_premium - improved_premium).max(0.0),
                estimated_cost: rule.estimated_cost,
                subsidy: rule.subsidy.map(|(scheme, percent)| SubsidyInfo {
                    scheme: scheme.to_string(),
                    subsidy_percent: percent,
                    net_cost: (rule.estimated_cost * (1.0 - percent / 100.0)).round(),
                }),
                priority_rank: (index + 1) as u8,
            }
        })
        .collect()
}
