//! Report summary types.

use crate::client::{Dependencies, IssueGroups};

/// Counts describing a generated report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Features with sprint work.
    pub features: usize,

    /// Epics with sprint work but no feature.
    pub epics: usize,

    /// Sprint issues with neither epic nor feature.
    pub issues: usize,

    /// Open issues blocking the sprint.
    pub incoming: usize,

    /// Open issues blocked by the sprint.
    pub outgoing: usize,

    /// Distinct issues fetched, including ancestors.
    pub issues_fetched: usize,
}

impl ReportSummary {
    /// Builds a summary from gathered results.
    #[must_use]
    pub fn new(groups: &IssueGroups, dependencies: &Dependencies, issues_fetched: usize) -> Self {
        Self {
            features: groups.features.len(),
            epics: groups.orphan_epics.len(),
            issues: groups.orphan_issues.len(),
            incoming: dependencies.incoming.len(),
            outgoing: dependencies.outgoing.len(),
            issues_fetched,
        }
    }

    /// Returns true if the report has nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features == 0
            && self.epics == 0
            && self.issues == 0
            && self.incoming == 0
            && self.outgoing == 0
    }
}
