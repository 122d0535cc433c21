//! Jira REST implementation of [`IssueTracker`].

use crate::config::TrackerConfig;
use crate::tracker::{IssueTracker, RawIssue, TrackerError};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Search endpoint, relative to the instance root.
const SEARCH_PATH: &str = "rest/api/2/search";

/// Body of a `/search` response; only the issues are read.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<Value>,
}

/// Issue tracker backed by the Jira REST API v2.
pub struct JiraTracker {
    http: reqwest::Client,
    config: TrackerConfig,
}

impl JiraTracker {
    /// Creates a tracker for the configured instance.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Http`] if the HTTP client cannot be built.
    pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    fn search_url(
        &self,
        jql: &str,
        start_at: usize,
        max_results: usize,
    ) -> Result<url::Url, TrackerError> {
        let mut url = self.config.endpoint(SEARCH_PATH)?;
        url.query_pairs_mut()
            .append_pair("jql", jql)
            .append_pair("startAt", &start_at.to_string())
            .append_pair("maxResults", &max_results.to_string())
            .append_pair("fields", &self.config.fields().search_fields().join(","));
        Ok(url)
    }
}

#[async_trait]
impl IssueTracker for JiraTracker {
    async fn search_page(
        &self,
        jql: &str,
        start_at: usize,
        max_results: usize,
    ) -> Result<Vec<RawIssue>, TrackerError> {
        let url = self.search_url(jql, start_at, max_results)?;
        debug!(%jql, start_at, max_results, "Requesting search page");

        let response = self
            .http
            .get(url)
            .bearer_auth(self.config.token())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrackerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let page: SearchResponse = response.json().await?;
        page.issues
            .iter()
            .map(|issue| RawIssue::from_jira(issue, self.config.fields()))
            .collect()
    }

    fn browse_url(&self, key: &str) -> String {
        self.config.browse_url(key)
    }
}
