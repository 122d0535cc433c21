//! Results of the gather operations.

use crate::issues::{IssueCache, IssueKey};
use std::collections::HashSet;

/// Sprint issues rolled up to the level the report shows them at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueGroups {
    /// Issues with neither an epic nor a feature.
    pub orphan_issues: Vec<IssueKey>,
    /// Epics of issues whose epic has no feature.
    pub orphan_epics: Vec<IssueKey>,
    /// Features of issues that have one.
    pub features: Vec<IssueKey>,
}

impl IssueGroups {
    /// Groups issues by their top-most ancestor, keeping each key once.
    ///
    /// Each group is sorted by rank.
    pub fn partition<'a>(issues: impl IntoIterator<Item = &'a IssueKey>, cache: &IssueCache) -> Self {
        let mut orphan_issues = HashSet::new();
        let mut orphan_epics = HashSet::new();
        let mut features = HashSet::new();

        for key in issues {
            let Some(issue) = cache.get(key.as_str()) else {
                continue;
            };
            if let Some(feature) = issue.feature() {
                features.insert(feature.clone());
            } else if let Some(epic) = issue.epic() {
                orphan_epics.insert(epic.clone());
            } else {
                orphan_issues.insert(issue.key().clone());
            }
        }

        Self {
            orphan_issues: ranked(orphan_issues, cache),
            orphan_epics: ranked(orphan_epics, cache),
            features: ranked(features, cache),
        }
    }
}

/// Issues linked to the sprint through blocking relationships.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    /// Open issues blocking the sprint's issues.
    pub incoming: Vec<IssueKey>,
    /// Open issues blocked by the sprint's issues.
    pub outgoing: Vec<IssueKey>,
}

fn ranked(keys: HashSet<IssueKey>, cache: &IssueCache) -> Vec<IssueKey> {
    let mut keys: Vec<IssueKey> = keys.into_iter().collect();
    cache.sort_by_rank(&mut keys);
    keys
}
