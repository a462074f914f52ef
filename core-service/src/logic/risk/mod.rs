//! Risk Module
//!
//! Converts enriched farm attributes into a 0-100 risk score.
//! Pure functions only - NO state, NO I/O.
//!
//! ## Structure
//! - `types`: RiskInputs, RiskResult, enums
//! - `rules`: Lookup tables and thresholds
//! - `scorer`: Four sub-scores and the final score
//! - `pricing`: Premium recommendation
//! - `suggestions`: Ordered improvement suggestions
//!
//! ## Usage
//! ```ignore
//! use agririsk_core::logic::risk::{calculate_risk_score, RiskInputs};
//!
//! let result = calculate_risk_score(&inputs);
//! println!("{} ({})", result.final_score, result.risk_category);
//! ```

pub mod types;
pub mod rules;
pub mod scorer;
pub mod pricing;
pub mod suggestions;

pub use types::{
    Confidence,
    DiversificationInputs,
    FinancialInputs,
    InfrastructureInputs,
    IrrigationType,
    RiskBreakdown,
    RiskCategory,
    RiskInputs,
    RiskResult,
    WeatherInputs,
};

pub use scorer::{calculate_risk_score, category_for_score, category_label_for_score};
pub use pricing::{calculate_premium, PremiumQuote};
pub use suggestions::{generate_suggestions, SubsidyInfo, Suggestion, SuggestionKind};
