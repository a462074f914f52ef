//! Input normalization & schema checks
//!
//! Mirrors the ML service's request/response schema so bad data is
//! rejected locally, without a round trip.

use super::error::MlError;
use super::types::{PredictionInput, PredictionOutput};

const SEASONS: [&str; 2] = ["kharif", "rabi"];
const CATEGORIES: [&str; 3] = ["low", "medium", "high"];

/// Lower-case enum fields, coerce 0-100 inputs into unit-interval fields,
/// then validate against the service schema.
pub fn normalize_input(mut input: PredictionInput) -> Result<PredictionInput, MlError> {
    input.state = input.state.trim().to_string();
    input.season = input.season.trim().to_lowercase();
    input.crop_type = input.crop_type.trim().to_lowercase();
    input.irrigation_type = input.irrigation_type.trim().to_lowercase();

    input.monsoon_reliability = to_unit_interval(input.monsoon_reliability);
    input.ndvi_score = to_unit_interval(input.ndvi_score);
    input.soil_fertility_index = to_unit_interval(input.soil_fertility_index);

    validate_input(&input)?;
    Ok(input)
}

/// Values given as percentages (> 1) are divided by 100
fn to_unit_interval(value: f64) -> f64 {
    if value > 1.0 {
        value / 100.0
    } else {
        value
    }
}

/// Collect every schema violation into one error
pub fn validate_input(input: &PredictionInput) -> Result<(), MlError> {
    let mut problems = Vec::new();

    if input.state.is_empty() {
        problems.push("state is required".to_string());
    }
    if !SEASONS.contains(&input.season.as_str()) {
        problems.push(format!("season must be kharif or rabi, got '{}'", input.season));
    }
    if input.crop_type.is_empty() {
        problems.push("crop_type is required".to_string());
    }
    if input.irrigation_type.is_empty() {
        problems.push("irrigation_type is required".to_string());
    }
    if input.land_acres.is_nan() || input.land_acres <= 0.0 {
        problems.push(format!("land_acres must be > 0, got {}", input.land_acres));
    }
    if input.crop_count < 1 {
        problems.push("crop_count must be >= 1".to_string());
    }
    if !(300..=900).contains(&input.kcc_score) {
        problems.push(format!("kcc_score must be 300-900, got {}", input.kcc_score));
    }

    check_min(&mut problems, "borewell_depth_ft", input.borewell_depth_ft, 0.0);
    check_min(&mut problems, "outstanding_debt_ratio", input.outstanding_debt_ratio, 0.0);
    check_min(&mut problems, "actual_rainfall_mm", input.actual_rainfall_mm, 0.0);
    check_range(&mut problems, "kcc_repayment_rate", input.kcc_repayment_rate, 0.0, 100.0);
    check_range(&mut problems, "monsoon_reliability", input.monsoon_reliability, 0.0, 1.0);
    check_range(&mut problems, "ndvi_score", input.ndvi_score, 0.0, 1.0);
    check_range(&mut problems, "soil_moisture_percent", input.soil_moisture_percent, 0.0, 100.0);
    check_range(&mut problems, "soil_fertility_index", input.soil_fertility_index, 0.0, 1.0);

    if !input.rainfall_deficit_percent.is_finite() {
        problems.push("rainfall_deficit_percent must be a number".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(MlError::Validation(problems.join("; ")))
    }
}

fn check_min(problems: &mut Vec<String>, field: &str, value: f64, min: f64) {
    if !value.is_finite() || value < min {
        problems.push(format!("{} must be >= {}, got {}", field, min, value));
    }
}

fn check_range(problems: &mut Vec<String>, field: &str, value: f64, min: f64, max: f64) {
    if !value.is_finite() || value < min || value > max {
        problems.push(format!("{} must be {}-{}, got {}", field, min, max, value));
    }
}

/// Check a service response against the output schema
pub fn validate_output(output: &PredictionOutput) -> Result<(), MlError> {
    let mut problems = Vec::new();

    if output.risk_score > 100 {
        problems.push(format!("risk_score must be 0-100, got {}", output.risk_score));
    }
    for (name, value) in output.breakdown.values() {
        if value > 25 {
            problems.push(format!("breakdown.{} must be 0-25, got {}", name, value));
        }
    }
    if !CATEGORIES.contains(&output.risk_category.as_str()) {
        problems.push(format!("unknown risk_category '{}'", output.risk_category));
    }
    if !output.claim_probability.is_finite() || !(0.0..=100.0).contains(&output.claim_probability) {
        problems.push(format!("claim_probability must be 0-100, got {}", output.claim_probability));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(MlError::Validation(format!("unexpected ML response: {}", problems.join("; "))))
    }
}
