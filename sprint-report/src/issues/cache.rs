//! Per-client issue cache.

use crate::issues::{Issue, IssueKey};
use std::collections::{HashMap, HashSet};

/// Owns every [`Issue`] materialized by a client, one per key.
///
/// Issues are inserted before their ancestors are resolved and stay marked
/// as pending until resolution finishes. Reaching a pending key again while
/// resolving ancestors means the epic/feature links form a cycle.
#[derive(Debug, Default)]
pub struct IssueCache {
    issues: HashMap<IssueKey, Issue>,
    pending: HashSet<IssueKey>,
    /// Keys that the tracker answered with a different key (moved issues).
    aliases: HashMap<IssueKey, IssueKey>,
}

impl IssueCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an issue by key or by an alias recorded for a moved issue.
    pub fn get(&self, key: &str) -> Option<&Issue> {
        self.issues.get(key).or_else(|| {
            self.aliases
                .get(key)
                .and_then(|actual| self.issues.get(actual.as_str()))
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether the issue is still resolving its ancestors.
    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains(key)
            || self
                .aliases
                .get(key)
                .is_some_and(|actual| self.pending.contains(actual.as_str()))
    }

    /// Number of distinct issues held.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns true if the issue, or anything below it, is in `status`.
    pub fn has_work_in_status(&self, key: &str, status: &str) -> bool {
        let Some(issue) = self.get(key) else {
            return false;
        };
        issue.status() == Some(status)
            || issue
                .children()
                .iter()
                .any(|child| self.has_work_in_status(child.as_str(), status))
    }

    /// Sorts keys by ascending rank, then key.
    pub fn sort_by_rank(&self, keys: &mut [IssueKey]) {
        keys.sort_by(|a, b| {
            let rank_a = self.get(a.as_str()).map_or("", Issue::rank);
            let rank_b = self.get(b.as_str()).map_or("", Issue::rank);
            rank_a.cmp(rank_b).then_with(|| a.cmp(b))
        });
    }

    /// Inserts a new issue and marks it pending.
    pub(crate) fn begin(&mut self, issue: Issue) {
        self.pending.insert(issue.key.clone());
        self.issues.insert(issue.key.clone(), issue);
    }

    /// Clears the pending mark once ancestors are resolved.
    pub(crate) fn finish(&mut self, key: &IssueKey) {
        self.pending.remove(key.as_str());
    }

    /// Drops an issue whose ancestors failed to resolve.
    pub(crate) fn discard(&mut self, key: &IssueKey) {
        self.pending.remove(key.as_str());
        self.issues.remove(key.as_str());
        self.aliases.retain(|_, actual| actual != key);
    }

    /// Records that `requested` resolves to the issue stored as `actual`.
    pub(crate) fn alias(&mut self, requested: &str, actual: &IssueKey) {
        if requested != actual.as_str() {
            self.aliases
                .insert(IssueKey::new(requested), actual.clone());
        }
    }

    /// Appends `child` to `parent`'s children unless it is already there.
    pub(crate) fn add_child(&mut self, parent: &IssueKey, child: &IssueKey) {
        if let Some(parent) = self.issues.get_mut(parent.as_str()) {
            if !parent.children.contains(child) {
                parent.children.push(child.clone());
            }
        }
    }

    /// Sets the ancestors of an issue.
    pub(crate) fn set_ancestors(
        &mut self,
        key: &IssueKey,
        epic: Option<IssueKey>,
        feature: Option<IssueKey>,
    ) {
        if let Some(issue) = self.issues.get_mut(key.as_str()) {
            issue.epic = epic;
            issue.feature = feature;
        }
    }
}
