//! Error types for the insights engine
//!
//! Every failure aborts the whole run before anything is written: a
//! partially correct analytics snapshot is worse than a missing one.

use thiserror::Error;

/// Result type for insights engine operations
pub type Result<T> = std::result::Result<T, InsightsError>;

/// Errors that can occur while generating insights
#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("no stats snapshot found for season {season} week {week}")]
    MissingData { season: i32, week: u32 },

    #[error("no ingest metadata found and no explicit season/week supplied")]
    MissingMetadata,

    #[error("insight computation failed: {0}")]
    Computation(String),

    #[error("persistence error: {0}")]
    Persistence(#[from] stats_store::StoreError),
}

impl InsightsError {
    /// Create a computation error from any displayable cause
    pub fn computation(msg: impl Into<String>) -> Self {
        InsightsError::Computation(msg.into())
    }
}
