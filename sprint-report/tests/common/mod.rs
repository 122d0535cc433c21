//! In-memory tracker shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use sprint_report::{IssueTracker, Jql, LinkType, RawIssue, TrackerError};
use std::collections::HashMap;
use std::sync::Mutex;

/// Answers searches from canned results, keyed by the exact JQL text.
///
/// Registering an issue also answers the `key = "..."` lookup for it.
#[derive(Default)]
pub struct InMemoryTracker {
    issues: HashMap<String, RawIssue>,
    queries: HashMap<String, Vec<String>>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl InMemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, raw: RawIssue) -> Self {
        self.queries
            .insert(Jql::new().and_key(&raw.key).build(), vec![raw.key.clone()]);
        self.issues.insert(raw.key.clone(), raw);
        self
    }

    pub fn with_issues(self, raws: impl IntoIterator<Item = RawIssue>) -> Self {
        raws.into_iter().fold(self, Self::with_issue)
    }

    /// Makes `jql` return the registered issues with `keys`, in order.
    pub fn with_query(mut self, jql: &Jql, keys: &[&str]) -> Self {
        self.queries.insert(
            jql.build(),
            keys.iter().map(|key| (*key).to_string()).collect(),
        );
        self
    }

    /// Number of page requests made for `jql`.
    pub fn page_requests(&self, jql: &Jql) -> usize {
        let query = jql.build();
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(q, _)| *q == query)
            .count()
    }

    /// Offsets requested for `jql`, in order.
    pub fn offsets(&self, jql: &Jql) -> Vec<usize> {
        let query = jql.build();
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(q, _)| *q == query)
            .map(|(_, start_at)| *start_at)
            .collect()
    }

    /// Total page requests of any kind.
    pub fn total_requests(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl IssueTracker for InMemoryTracker {
    async fn search_page(
        &self,
        jql: &str,
        start_at: usize,
        max_results: usize,
    ) -> Result<Vec<RawIssue>, TrackerError> {
        self.calls
            .lock()
            .unwrap()
            .push((jql.to_string(), start_at));

        let Some(keys) = self.queries.get(jql) else {
            return Ok(Vec::new());
        };
        Ok(keys
            .iter()
            .skip(start_at)
            .take(max_results)
            .map(|key| {
                self.issues
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| panic!("query result {key} is not registered"))
            })
            .collect())
    }

    fn browse_url(&self, key: &str) -> String {
        format!("https://tracker.test/browse/{key}")
    }
}

/// Query issued by `gather_issues`.
pub fn sprint_query(filter: &str, start: NaiveDate) -> Jql {
    Jql::filter(filter)
        .and_type_not_in(&["Feature", "Epic"])
        .and_open_or_resolved_after(start)
}

/// Queries issued by `gather_dependencies`, as (incoming, outgoing).
pub fn dependency_queries(filter: &str) -> (Jql, Jql) {
    let base = Jql::filter(filter).and_not_done();
    (
        Jql::new()
            .and_linked_issues_of(&base, LinkType::IsBlockedBy)
            .and_not_done(),
        Jql::new()
            .and_linked_issues_of(&base, LinkType::Blocks)
            .and_not_done(),
    )
}

pub fn sprint_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}
