//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No access token was supplied and none is set in the environment.
    #[error("Missing Jira token: set the {env_var} environment variable to your Jira personal access token")]
    MissingToken { env_var: &'static str },

    /// The tracker base URL could not be parsed.
    #[error("Invalid Jira URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
