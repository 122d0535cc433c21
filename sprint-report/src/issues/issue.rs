//! Reconstructed issues.

use crate::issues::IssueKey;
use crate::tracker::{Assignee, RawIssue};

/// An issue with its place in the issue → epic → feature hierarchy.
///
/// Ancestors and children are held as keys; resolve them through the
/// [`IssueCache`](crate::issues::IssueCache) that owns every issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub(crate) key: IssueKey,
    pub(crate) url: String,
    pub(crate) summary: String,
    pub(crate) rank: String,
    pub(crate) assignee: Option<Assignee>,
    pub(crate) status: Option<String>,
    pub(crate) resolution_date: Option<String>,
    pub(crate) epic: Option<IssueKey>,
    pub(crate) feature: Option<IssueKey>,
    pub(crate) children: Vec<IssueKey>,
}

impl Issue {
    /// Copies the scalar fields of a raw record. Ancestors start unset.
    pub(crate) fn from_raw(raw: &RawIssue, url: String) -> Self {
        Self {
            key: IssueKey::new(raw.key.clone()),
            url,
            summary: raw.summary.clone(),
            rank: raw.rank.clone().unwrap_or_default(),
            assignee: raw.assignee.clone(),
            status: raw.status_category.clone(),
            resolution_date: raw.resolution_date.clone(),
            epic: None,
            feature: None,
            children: Vec::new(),
        }
    }

    pub fn key(&self) -> &IssueKey {
        &self.key
    }

    /// Browser link to the issue.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Lexical rank; empty when the tracker reported none.
    pub fn rank(&self) -> &str {
        &self.rank
    }

    pub fn assignee(&self) -> Option<&Assignee> {
        self.assignee.as_ref()
    }

    /// Status category name.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn resolution_date(&self) -> Option<&str> {
        self.resolution_date.as_deref()
    }

    /// Immediate parent epic.
    pub fn epic(&self) -> Option<&IssueKey> {
        self.epic.as_ref()
    }

    /// Top-level feature, inherited from the epic when there is one.
    pub fn feature(&self) -> Option<&IssueKey> {
        self.feature.as_ref()
    }

    /// Issues that name this one as their epic or feature, in discovery order.
    pub fn children(&self) -> &[IssueKey] {
        &self.children
    }
}
