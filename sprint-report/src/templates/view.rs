//! Template input: the report data flattened into serializable views.

use crate::client::{Dependencies, IssueGroups};
use crate::issues::{Issue, IssueCache, IssueKey};
use crate::tracker::Assignee;
use chrono::NaiveDate;
use serde::Serialize;

/// Status category counted as active work.
pub const IN_PROGRESS: &str = "In Progress";

/// Title and reporting period of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMeta {
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Everything a report template can show.
#[derive(Debug, Clone, Copy)]
pub struct ReportData<'a> {
    pub cache: &'a IssueCache,
    pub groups: &'a IssueGroups,
    pub dependencies: &'a Dependencies,
    pub meta: &'a ReportMeta,
}

/// Root object handed to the template.
#[derive(Debug, Serialize)]
pub(crate) struct ReportView<'a> {
    title: &'a str,
    start: String,
    end: String,
    issues: Vec<IssueView<'a>>,
    epics: Vec<IssueView<'a>>,
    features: Vec<IssueView<'a>>,
    incoming: Vec<IssueView<'a>>,
    outgoing: Vec<IssueView<'a>>,
}

impl<'a> ReportView<'a> {
    pub(crate) fn build(data: &ReportData<'a>) -> Self {
        let cache = data.cache;
        Self {
            title: &data.meta.title,
            start: format_date(data.meta.start),
            end: format_date(data.meta.end),
            issues: IssueView::list(&data.groups.orphan_issues, cache),
            epics: IssueView::list(&data.groups.orphan_epics, cache),
            features: IssueView::list(&data.groups.features, cache),
            incoming: IssueView::list(&data.dependencies.incoming, cache),
            outgoing: IssueView::list(&data.dependencies.outgoing, cache),
        }
    }
}

/// One issue with its children nested below it.
#[derive(Debug, Serialize)]
struct IssueView<'a> {
    key: &'a str,
    url: &'a str,
    summary: &'a str,
    rank: &'a str,
    status: Option<&'a str>,
    assignee: Option<&'a Assignee>,
    resolution_date: Option<&'a str>,
    epic: Option<&'a str>,
    feature: Option<&'a str>,
    /// Whether the issue or any descendant is in progress.
    in_progress: bool,
    children: Vec<IssueView<'a>>,
}

impl<'a> IssueView<'a> {
    fn list(keys: &[IssueKey], cache: &'a IssueCache) -> Vec<Self> {
        keys.iter()
            .filter_map(|key| cache.get(key.as_str()))
            .map(|issue| Self::new(issue, cache))
            .collect()
    }

    fn new(issue: &'a Issue, cache: &'a IssueCache) -> Self {
        Self {
            key: issue.key().as_str(),
            url: issue.url(),
            summary: issue.summary(),
            rank: issue.rank(),
            status: issue.status(),
            assignee: issue.assignee(),
            resolution_date: issue.resolution_date(),
            epic: issue.epic().map(IssueKey::as_str),
            feature: issue.feature().map(IssueKey::as_str),
            in_progress: cache.has_work_in_status(issue.key().as_str(), IN_PROGRESS),
            children: Self::list(issue.children(), cache),
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
