//! HTTP handlers

pub mod health;
pub mod risk;
pub mod fraud;
pub mod farmers;
pub mod ml;
