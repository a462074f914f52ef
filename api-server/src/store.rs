//! Fraud-case store
//!
//! Flat JSON array on disk, keyed by case id. Writes are serialized
//! within the process; there is no cross-process locking.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::FraudCase;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub struct FraudCaseStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FraudCaseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All cases in insertion order. A missing file is an empty store.
    pub async fn list(&self) -> Result<Vec<FraudCase>, StoreError> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&data)?)
    }

    pub async fn get(&self, id: &str) -> Result<Option<FraudCase>, StoreError> {
        Ok(self.list().await?.into_iter().find(|c| c.id == id))
    }

    /// Replace the case with the same id, else append.
    /// A replaced case keeps its original `created_at`.
    pub async fn upsert(&self, mut case: FraudCase) -> Result<FraudCase, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut cases = self.list().await?;
        match cases.iter_mut().find(|c| c.id == case.id) {
            Some(existing) => {
                case.created_at = existing.created_at;
                *existing = case.clone();
            }
            None => cases.push(case.clone()),
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_vec_pretty(&cases)?;
        tokio::fs::write(&self.path, data).await?;

        tracing::debug!("Stored fraud case {} ({} total)", case.id, cases.len());
        Ok(case)
    }
}
