//! Fraud Module
//!
//! Compares claimed farm attributes against verified and satellite-derived
//! ones. Each check is independent and may emit one flag.
//!
//! ## Structure
//! - `types`: FraudFlag, FraudCheckResult, enums
//! - `rules`: Thresholds, weights, crop NDVI table
//! - `checker`: The individual checks and aggregation
//! - `ndvi`: NDVI uniformity
//! - `trust`: Trust score adjustment
//!
//! ## Usage
//! ```ignore
//! use agririsk_core::logic::fraud::{detect_fraud, Recommendation};
//!
//! let result = detect_fraud(&params);
//! if result.recommendation == Recommendation::Reject {
//!     // block payout
//! }
//! ```

pub mod types;
pub mod rules;
pub mod checker;
pub mod ndvi;
pub mod trust;

pub use types::{
    Evidence,
    FraudCheckParams,
    FraudCheckResult,
    FraudFlag,
    FraudFlagType,
    NearbyClaim,
    Recommendation,
    Severity,
};

pub use rules::{crop_ndvi_range, FraudThresholds, NdviRange};
pub use checker::{detect_fraud, detect_fraud_with_thresholds};
pub use ndvi::calculate_ndvi_uniformity;
pub use trust::adjust_trust_score;
