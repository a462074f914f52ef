//! AgriRisk Core - Scoring Engines & ML Client
//!
//! Farm-level insurance risk assessment building blocks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       AGRIRISK CORE                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌──────────────┐  ┌─────────────────────┐  │
//! │  │ Risk Scorer │  │ Fraud Checker│  │ ML Client           │  │
//! │  │ + Pricing   │  │ + NDVI/Trust │  │ (retry + fallback)  │  │
//! │  └──────┬──────┘  └──────────────┘  └──────────┬──────────┘  │
//! │         └──────────── local fallback ──────────┘             │
//! │                                                              │
//! │  ┌────────────────────────────┐                              │
//! │  │ Farmer Repository (trait)  │                              │
//! │  └────────────────────────────┘                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scoring and fraud checks are pure functions. The ML client is the
//! only async boundary.

pub mod constants;
pub mod logic;

pub use logic::farmer::{FarmerRecord, FarmerRepository, InMemoryFarmerRepository};
pub use logic::fraud::{
    adjust_trust_score, calculate_ndvi_uniformity, detect_fraud, detect_fraud_with_thresholds,
    FraudCheckParams, FraudCheckResult, FraudFlag, FraudThresholds, Recommendation,
};
pub use logic::ml_client::{MlClient, MlClientConfig, MlError, Prediction, PredictionInput};
pub use logic::risk::{
    calculate_premium, calculate_risk_score, generate_suggestions, PremiumQuote, RiskInputs,
    RiskResult, Suggestion,
};
