//! Runner error types.

use chrono::NaiveDate;
use std::path::PathBuf;

/// Errors that can occur while producing a report.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Fetching or assembling issues failed.
    #[error(transparent)]
    Client(#[from] crate::client::ClientError),

    /// Loading or rendering the template failed.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// The reporting period ends before it starts.
    #[error("Report period ends ({end}) before it starts ({start})")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    /// The rendered report could not be written.
    #[error("Failed to write report to '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
