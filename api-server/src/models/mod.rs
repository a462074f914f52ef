//! Request / response models

pub mod assessment;
pub mod fraud_case;
pub mod prediction;

pub use assessment::*;
pub use fraud_case::*;
pub use prediction::*;
