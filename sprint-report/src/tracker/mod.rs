//! Issue tracker backends.
//!
//! The client only needs one capability from the tracker: run a JQL search
//! and return one page of raw records. [`JiraTracker`] provides it over the
//! Jira REST API; tests substitute an in-memory implementation.

mod error;
mod jira;
mod raw;

pub use error::TrackerError;
pub use jira::JiraTracker;
pub use raw::{Assignee, RawIssue};

use async_trait::async_trait;

/// Number of results requested per search page.
pub const PAGE_SIZE: usize = 50;

/// A searchable issue tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Runs `jql` and returns up to `max_results` records starting at `start_at`.
    ///
    /// An empty page means there are no further results.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] on transport or service failures.
    async fn search_page(
        &self,
        jql: &str,
        start_at: usize,
        max_results: usize,
    ) -> Result<Vec<RawIssue>, TrackerError>;

    /// Browser link for an issue.
    fn browse_url(&self, key: &str) -> String;
}
