//! Logic Module - Scoring Engines & Integrations
//!
//! ## Structure
//! - `risk/` - Risk scorer, premium pricing, improvement suggestions
//! - `fraud/` - Rule-based fraud checks, NDVI uniformity, trust score
//! - `farmer/` - Read-only farmer record repository
//! - `ml_client/` - Remote ML scoring with retry and local fallback

pub mod risk;
pub mod fraud;
pub mod farmer;
pub mod ml_client;
