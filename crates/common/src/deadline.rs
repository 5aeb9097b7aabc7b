//! Run-wide deadline shared by every pipeline step

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::ApiError;

/// Default overall budget for one pipeline run
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// A fixed point in time after which all pending calls are abandoned.
///
/// Copied into each call; expiring it aborts whichever exchange is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    started_at: Instant,
    expires_at: Instant,
}

impl Deadline {
    /// Create a deadline `timeout` from now
    pub fn after(timeout: Duration) -> Self {
        let started_at = Instant::now();
        Self {
            started_at,
            expires_at: started_at + timeout,
        }
    }

    /// Total budget this deadline was created with
    pub fn budget(&self) -> Duration {
        self.expires_at.saturating_duration_since(self.started_at)
    }

    /// Time left before expiry, zero once expired
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Fail fast if the deadline has already passed
    pub fn check(&self) -> Result<(), ApiError> {
        if self.is_expired() {
            return Err(ApiError::DeadlineExceeded(self.budget()));
        }
        Ok(())
    }

    /// Run `fut` to completion unless the deadline passes first.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.check()?;
        match tokio::time::timeout_at(self.expires_at, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(budget = ?self.budget(), "Deadline exceeded while call in flight");
                Err(ApiError::DeadlineExceeded(self.budget()))
            }
        }
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::after(DEFAULT_TIMEOUT)
    }
}
