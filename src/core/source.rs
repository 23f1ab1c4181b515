//! Live exchange-rate source abstractions

use super::rates::RateTable;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;

/// Why a live rate table could not be acquired.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AcquisitionError {
    #[error("Rate request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Rate request failed: {0}")]
    Network(String),

    #[error("Rate service returned HTTP {0}")]
    Status(u16),

    #[error("Malformed rate response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait LiveRateSource: Send + Sync {
    /// Fetches a full USD-based rate table, giving up at `deadline`.
    async fn fetch_rates(&self, deadline: Instant) -> Result<RateTable, AcquisitionError>;
}

