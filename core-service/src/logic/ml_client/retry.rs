//! Retry State Machine
//!
//! ```text
//!   Attempting(0) ──ok──────────────────────────────▶ Succeeded
//!        │
//!        │ retryable error, n < max_retries
//!        ▼   (sleep backoff_delay(n))
//!   Attempting(n+1) ──ok──▶ Succeeded
//!        │
//!        │ retries exhausted / non-retryable
//!        ├── fallback enabled & error allows it ──▶ FallbackUsed
//!        └── otherwise ───────────────────────────▶ Failed
//! ```
//!
//! Transitions and delays are pure; only `run_with_retry` sleeps.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use super::error::MlError;
use crate::constants::MAX_BACKOFF_MS;

/// Where a call currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "attempt", rename_all = "snake_case")]
pub enum RetryState {
    /// Attempt index, 0-based
    Attempting(u32),
    Succeeded,
    FallbackUsed,
    Failed,
}

impl RetryState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RetryState::Attempting(_))
    }
}

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub fallback_enabled: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: crate::constants::DEFAULT_ML_MAX_RETRIES,
            base_delay: Duration::from_millis(crate::constants::DEFAULT_ML_BACKOFF_BASE_MS),
            max_delay: Duration::from_millis(MAX_BACKOFF_MS),
            fallback_enabled: true,
        }
    }
}

impl RetryPolicy {
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        backoff_delay(attempt, self.base_delay, self.max_delay)
    }

    /// Next state after attempt `attempt` finished with `error` (None = ok)
    pub fn next_state(&self, attempt: u32, error: Option<&MlError>) -> RetryState {
        match error {
            None => RetryState::Succeeded,
            Some(e) if e.is_retryable() && attempt < self.max_retries => RetryState::Attempting(attempt + 1),
            Some(e) if e.allows_fallback() && self.fallback_enabled => RetryState::FallbackUsed,
            Some(_) => RetryState::Failed,
        }
    }
}

/// base * 2^attempt, capped at `max`
pub fn backoff_delay(attempt: u32, base: Duration, max: Duration) -> Duration {
    let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    base.checked_mul(factor).unwrap_or(max).min(max)
}

/// Terminal result of a retried call
#[derive(Debug)]
pub enum RetryOutcome<T> {
    Succeeded { value: T, attempts: u32 },
    FallbackUsed { last_error: MlError, attempts: u32 },
    Failed { error: MlError, attempts: u32 },
}

impl<T> RetryOutcome<T> {
    pub fn state(&self) -> RetryState {
        match self {
            RetryOutcome::Succeeded { .. } => RetryState::Succeeded,
            RetryOutcome::FallbackUsed { .. } => RetryState::FallbackUsed,
            RetryOutcome::Failed { .. } => RetryState::Failed,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Succeeded { attempts, .. }
            | RetryOutcome::FallbackUsed { attempts, .. }
            | RetryOutcome::Failed { attempts, .. } => *attempts,
        }
    }
}

/// Drive `operation` through the state machine.
///
/// `operation` receives the 0-based attempt index.
pub async fn run_with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> RetryOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, MlError>>,
{
    let mut attempt = 0;

    loop {
        let result = operation(attempt).await;
        let attempts = attempt + 1;

        match (policy.next_state(attempt, result.as_ref().err()), result) {
            (_, Ok(value)) => return RetryOutcome::Succeeded { value, attempts },
            (RetryState::Attempting(next), Err(e)) => {
                let delay = policy.backoff_delay(attempt);
                log::warn!(
                    "ML call failed (attempt {}/{}): {} - retrying in {}ms",
                    attempts,
                    policy.max_retries + 1,
                    e,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
                attempt = next;
            }
            (RetryState::FallbackUsed, Err(e)) => {
                log::warn!("ML call gave up after {} attempt(s): {} - using local fallback", attempts, e);
                return RetryOutcome::FallbackUsed { last_error: e, attempts };
            }
            (_, Err(e)) => {
                log::error!("ML call failed after {} attempt(s): {}", attempts, e);
                return RetryOutcome::Failed { error: e, attempts };
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
