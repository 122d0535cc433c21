//! Issue client: searches the tracker and rebuilds the issue hierarchy.
//!
//! Every raw search result passes through [`Client::materialize`], which
//! stores it in the client's [`IssueCache`] and then resolves its epic and
//! feature by looking them up through the same cache. The cache guarantees a
//! single [`Issue`] per key and single registration in each parent's
//! children, however many times a key comes back from the tracker.

mod error;
mod groups;

pub use error::ClientError;
pub use groups::{Dependencies, IssueGroups};

use crate::config::TrackerConfig;
use crate::issues::{Issue, IssueCache, IssueKey};
use crate::jql::{Jql, LinkType};
use crate::tracker::{IssueTracker, JiraTracker, RawIssue, PAGE_SIZE};
use chrono::NaiveDate;
use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, info, info_span, Instrument};

/// Issue types that group work rather than being work.
const GROUPING_TYPES: [&str; 2] = ["Feature", "Epic"];

/// Searches an [`IssueTracker`] and caches the resulting issues.
pub struct Client<T> {
    tracker: T,
    cache: IssueCache,
}

impl Client<JiraTracker> {
    /// Creates a client for the configured Jira instance.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Tracker`] if the HTTP client cannot be built.
    pub fn connect(config: TrackerConfig) -> Result<Self, ClientError> {
        Ok(Self::new(JiraTracker::new(config)?))
    }

    /// Creates a client from `JIRA_URL` and `JIRA_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if `JIRA_TOKEN` is not set.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::connect(TrackerConfig::resolve(None, None)?)
    }
}

impl<T: IssueTracker> Client<T> {
    /// Creates a client with an empty cache.
    pub fn new(tracker: T) -> Self {
        Self {
            tracker,
            cache: IssueCache::new(),
        }
    }

    /// Returns the issues materialized so far.
    pub fn cache(&self) -> &IssueCache {
        &self.cache
    }

    /// Returns a cached issue.
    pub fn issue(&self, key: &str) -> Option<&Issue> {
        self.cache.get(key)
    }

    /// Returns the underlying tracker.
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Runs a query, fetching pages until one comes back empty.
    ///
    /// Results keep the tracker's order; issues already in the cache are
    /// returned as cached.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if a page request fails or an ancestor cannot
    /// be resolved.
    pub async fn search(&mut self, jql: &Jql) -> Result<Vec<IssueKey>, ClientError> {
        let query = jql.build();
        debug!(query = %query, "Searching");

        let mut keys = Vec::new();
        let mut start_at = 0;
        loop {
            let page = self
                .tracker
                .search_page(&query, start_at, PAGE_SIZE)
                .await?;
            if page.is_empty() {
                break;
            }
            debug!(start_at, count = page.len(), "Received page");
            start_at += PAGE_SIZE;

            for raw in page {
                keys.push(self.materialize(raw).await?);
            }
        }

        Ok(keys)
    }

    /// Returns the issue with `key`, searching for it on a cache miss.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] if the search returns nothing.
    /// - [`ClientError::Conflict`] if it returns more than one issue.
    /// - [`ClientError::Cycle`] if `key` is still resolving its own ancestors.
    pub fn get<'a>(&'a mut self, key: &'a str) -> BoxFuture<'a, Result<IssueKey, ClientError>> {
        async move {
            if self.cache.is_pending(key) {
                return Err(ClientError::Cycle {
                    key: key.to_string(),
                });
            }
            if let Some(issue) = self.cache.get(key) {
                return Ok(issue.key().clone());
            }

            let mut results = self.search(&Jql::new().and_key(key)).await?;
            let found = match results.len() {
                0 => {
                    return Err(ClientError::NotFound {
                        key: key.to_string(),
                    })
                }
                1 => results.remove(0),
                count => {
                    return Err(ClientError::Conflict {
                        key: key.to_string(),
                        count,
                    })
                }
            };

            if self.cache.is_pending(found.as_str()) {
                return Err(ClientError::Cycle {
                    key: found.to_string(),
                });
            }
            self.cache.alias(key, &found);
            Ok(found)
        }
        .boxed()
    }

    /// Turns a raw record into a cached [`Issue`] and resolves its ancestors.
    ///
    /// If the key is already cached the record is ignored and the cached
    /// issue's key is returned. Otherwise the issue is cached first, then its
    /// epic (or, without an epic, its feature) is fetched through [`get`],
    /// and the issue is registered as one of that ancestor's children.
    ///
    /// [`get`]: Client::get
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if an ancestor cannot be fetched or the
    /// ancestor links form a cycle. The new issue is dropped from the cache
    /// in that case.
    pub async fn materialize(&mut self, raw: RawIssue) -> Result<IssueKey, ClientError> {
        if let Some(issue) = self.cache.get(&raw.key) {
            return Ok(issue.key().clone());
        }

        let issue = Issue::from_raw(&raw, self.tracker.browse_url(&raw.key));
        let key = issue.key().clone();
        self.cache.begin(issue);

        match self.resolve_ancestors(&key, &raw).await {
            Ok(()) => {
                self.cache.finish(&key);
                Ok(key)
            }
            Err(e) => {
                self.cache.discard(&key);
                Err(e)
            }
        }
    }

    async fn resolve_ancestors(&mut self, key: &IssueKey, raw: &RawIssue) -> Result<(), ClientError> {
        if let Some(epic_key) = raw.epic_link.as_deref() {
            let epic = self.get(epic_key).await?;
            let feature = self
                .cache
                .get(epic.as_str())
                .and_then(|epic| epic.feature().cloned());
            self.cache.add_child(&epic, key);
            self.cache.set_ancestors(key, Some(epic), feature);
        } else if let Some(feature_key) = raw.feature_link.as_deref() {
            let feature = self.get(feature_key).await?;
            self.cache.add_child(&feature, key);
            self.cache.set_ancestors(key, None, Some(feature));
        }
        Ok(())
    }

    /// Collects the sprint's work rolled up to features, epics and issues.
    ///
    /// Matches `filter` minus features and epics, keeping issues that are
    /// still open or were resolved after `sprint_start`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if any search or ancestor lookup fails.
    pub async fn gather_issues(
        &mut self,
        filter: &str,
        sprint_start: NaiveDate,
    ) -> Result<IssueGroups, ClientError> {
        let span = info_span!("gather_issues", %filter, %sprint_start);

        async {
            let jql = Jql::filter(filter)
                .and_type_not_in(&GROUPING_TYPES)
                .and_open_or_resolved_after(sprint_start);
            let issues = self.search(&jql).await?;
            let groups = IssueGroups::partition(&issues, &self.cache);

            info!(
                issues = issues.len(),
                orphan_issues = groups.orphan_issues.len(),
                orphan_epics = groups.orphan_epics.len(),
                features = groups.features.len(),
                "Gathered sprint issues"
            );
            Ok(groups)
        }
        .instrument(span)
        .await
    }

    /// Collects open issues blocking, or blocked by, the open issues in `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if either search fails.
    pub async fn gather_dependencies(&mut self, filter: &str) -> Result<Dependencies, ClientError> {
        let span = info_span!("gather_dependencies", %filter);

        async {
            let base = Jql::filter(filter).and_not_done();

            let incoming_query = Jql::new()
                .and_linked_issues_of(&base, LinkType::IsBlockedBy)
                .and_not_done();
            let mut incoming = self.search(&incoming_query).await?;
            self.cache.sort_by_rank(&mut incoming);

            let outgoing_query = Jql::new()
                .and_linked_issues_of(&base, LinkType::Blocks)
                .and_not_done();
            let mut outgoing = self.search(&outgoing_query).await?;
            self.cache.sort_by_rank(&mut outgoing);

            info!(
                incoming = incoming.len(),
                outgoing = outgoing.len(),
                "Gathered dependencies"
            );
            Ok(Dependencies { incoming, outgoing })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn from_env_requires_token() {
        temp_env::with_vars(
            [("JIRA_URL", Some("https://jira.example.com")), ("JIRA_TOKEN", None)],
            || {
                let result = Client::from_env();
                assert!(matches!(
                    result,
                    Err(ClientError::Config(ConfigError::MissingToken { .. }))
                ));
            },
        );
    }

    #[test]
    fn from_env_uses_environment() {
        temp_env::with_vars(
            [
                ("JIRA_URL", Some("https://jira.example.com")),
                ("JIRA_TOKEN", Some("secret")),
            ],
            || {
                let client = Client::from_env().unwrap();
                assert!(client.cache().is_empty());
                assert_eq!(
                    client.tracker().browse_url("PROJ-1"),
                    "https://jira.example.com/browse/PROJ-1"
                );
            },
        );
    }
}
