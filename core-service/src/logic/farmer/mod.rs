//! Farmer Module
//!
//! Read-only access to farmer records (KCC, land records, claim history).
//! Callers inject a `FarmerRepository` at construction time.

pub mod repository;

pub use repository::{FarmerRecord, FarmerRepository, InMemoryFarmerRepository, RepositoryError};
