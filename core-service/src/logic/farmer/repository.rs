//! Farmer Repository
//!
//! Lookup-by-id over farmer records. The in-memory implementation is
//! immutable after construction, so it can be shared across requests
//! without locking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::logic::risk::RiskInputs;

/// Farmer record as held by the bank / land registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerRecord {
    pub id: String,
    pub name: String,
    pub state: String,
    pub district: String,
    /// Land area on the land record
    pub land_acres: f64,
    /// KCC credit score (300 - 900)
    pub kcc_score: u16,
    /// KCC repayment rate in percent
    pub repayment_rate: f64,
    pub outstanding_debt_ratio: f64,
    pub has_insurance: bool,
    /// Share of past claims that held up on inspection (0 - 100)
    #[serde(default)]
    pub historical_claims_accuracy: Option<f64>,
}

impl FarmerRecord {
    /// Overwrite the financial block of `inputs` with KCC data
    pub fn apply_financials(&self, inputs: &mut RiskInputs) {
        inputs.financial.repayment_rate = self.repayment_rate;
        inputs.financial.outstanding_debt_ratio = self.outstanding_debt_ratio;
        inputs.financial.has_insurance = self.has_insurance;
    }
}

/// Read-only farmer lookup
pub trait FarmerRepository: Send + Sync {
    fn find_by_id(&self, id: &str) -> Option<FarmerRecord>;
}

/// Repository load errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// HashMap-backed repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryFarmerRepository {
    records: HashMap<String, FarmerRecord>,
}

impl InMemoryFarmerRepository {
    /// Build from records. Later duplicates win.
    pub fn new(records: Vec<FarmerRecord>) -> Self {
        let records = records.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self { records }
    }

    /// Load a JSON array of records
    pub fn from_json_file(path: &Path) -> Result<Self, RepositoryError> {
        let data = std::fs::read(path)?;
        let records: Vec<FarmerRecord> = serde_json::from_slice(&data)?;
        log::info!("Loaded {} farmer records from {}", records.len(), path.display());
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FarmerRepository for InMemoryFarmerRepository {
    fn find_by_id(&self, id: &str) -> Option<FarmerRecord> {
        self.records.get(id).cloned()
    }
}
