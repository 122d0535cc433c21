//! Tracker error types.

use thiserror::Error;

/// Errors returned by an issue tracker backend.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Jira API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The request URL could not be built.
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// A search result did not have the expected shape.
    #[error("Malformed issue in search response: {message}")]
    Decode { message: String },
}
