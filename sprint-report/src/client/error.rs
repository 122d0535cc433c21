//! Client error types.

use crate::config::ConfigError;
use crate::tracker::TrackerError;
use thiserror::Error;

/// Errors that can occur while fetching and assembling issues.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The tracker request failed.
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// A key lookup returned no issue.
    #[error("Could not find issue {key}")]
    NotFound { key: String },

    /// A key lookup returned several issues.
    #[error("Found {count} issues for key {key}, expected exactly one")]
    Conflict { key: String, count: usize },

    /// The epic/feature links of an issue lead back to itself.
    #[error("Issue {key} is its own ancestor through its epic/feature links")]
    Cycle { key: String },
}
