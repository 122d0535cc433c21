//! Tracker connection settings.

use crate::config::{ConfigError, FieldMap};
use std::fmt;
use url::Url;

/// Environment variable holding the Jira base URL.
pub const URL_ENV: &str = "JIRA_URL";

/// Environment variable holding the Jira personal access token.
pub const TOKEN_ENV: &str = "JIRA_TOKEN";

/// Jira instance used when neither a flag nor [`URL_ENV`] names one.
pub const DEFAULT_URL: &str = "https://issues.redhat.com";

/// Connection settings for the Jira instance.
#[derive(Clone)]
pub struct TrackerConfig {
    /// Base URL of the Jira instance.
    base_url: Url,
    /// Personal access token sent as a bearer token.
    token: String,
    /// Custom field ids for rank and hierarchy links.
    fields: FieldMap,
}

impl TrackerConfig {
    /// Creates a configuration from an explicit URL and token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL does not parse and
    /// [`ConfigError::MissingToken`] if the token is blank.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::MissingToken { env_var: TOKEN_ENV });
        }
        let base_url = Url::parse(base_url).map_err(|source| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            base_url,
            token,
            fields: FieldMap::default(),
        })
    }

    /// Resolves settings from explicit values, falling back to the environment.
    ///
    /// Precedence: explicit value, then [`URL_ENV`]/[`TOKEN_ENV`], then
    /// [`DEFAULT_URL`] for the URL. There is no default token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] if no token can be found.
    pub fn resolve(url: Option<String>, token: Option<String>) -> Result<Self, ConfigError> {
        let url = url
            .or_else(|| non_empty_env(URL_ENV))
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        let token = token
            .or_else(|| non_empty_env(TOKEN_ENV))
            .ok_or(ConfigError::MissingToken { env_var: TOKEN_ENV })?;
        Self::new(&url, token)
    }

    /// Replaces the custom field map.
    #[must_use]
    pub fn with_fields(mut self, fields: FieldMap) -> Self {
        self.fields = fields;
        self
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the access token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the custom field map.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Builds the browser link for an issue.
    #[must_use]
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{key}", self.root())
    }

    /// Builds an absolute URL for a REST path such as `rest/api/2/search`.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL does not parse.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}/{}", self.root(), path.trim_start_matches('/')))
    }

    /// Base URL without a trailing slash, keeping any context path.
    fn root(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

impl fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("fields", &self.fields)
            .finish()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_blank_token() {
        let result = TrackerConfig::new(DEFAULT_URL, "  ");
        assert!(matches!(result, Err(ConfigError::MissingToken { .. })));
    }

    #[test]
    fn new_rejects_invalid_url() {
        let result = TrackerConfig::new("not a url", "secret");
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn resolve_fails_without_token() {
        temp_env::with_vars_unset([URL_ENV, TOKEN_ENV], || {
            let result = TrackerConfig::resolve(None, None);
            assert!(matches!(result, Err(ConfigError::MissingToken { .. })));
        });
    }

    #[test]
    fn resolve_uses_environment() {
        temp_env::with_vars(
            [
                (URL_ENV, Some("https://jira.example.com")),
                (TOKEN_ENV, Some("from-env")),
            ],
            || {
                let config = TrackerConfig::resolve(None, None).unwrap();
                assert_eq!(config.base_url().as_str(), "https://jira.example.com/");
                assert_eq!(config.token(), "from-env");
            },
        );
    }

    #[test]
    fn resolve_prefers_explicit_values() {
        temp_env::with_vars(
            [
                (URL_ENV, Some("https://jira.example.com")),
                (TOKEN_ENV, Some("from-env")),
            ],
            || {
                let config = TrackerConfig::resolve(
                    Some("https://other.example.com".to_string()),
                    Some("explicit".to_string()),
                )
                .unwrap();
                assert_eq!(config.base_url().as_str(), "https://other.example.com/");
                assert_eq!(config.token(), "explicit");
            },
        );
    }

    #[test]
    fn resolve_defaults_url() {
        temp_env::with_var_unset(URL_ENV, || {
            let config = TrackerConfig::resolve(None, Some("secret".to_string())).unwrap();
            assert_eq!(config.browse_url("ABC-1"), "https://issues.redhat.com/browse/ABC-1");
        });
    }

    #[test]
    fn endpoint_keeps_context_path() {
        let config = TrackerConfig::new("https://example.com/jira/", "secret").unwrap();
        let url = config.endpoint("/rest/api/2/search").unwrap();
        assert_eq!(url.as_str(), "https://example.com/jira/rest/api/2/search");
        assert_eq!(config.browse_url("X-1"), "https://example.com/jira/browse/X-1");
    }

    #[test]
    fn debug_redacts_token() {
        let config = TrackerConfig::new(DEFAULT_URL, "super-secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
    }
}
