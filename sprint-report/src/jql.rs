//! JQL query composition.
//!
//! User-supplied filters are wrapped in parentheses so that a top-level `OR`
//! cannot escape the surrounding `AND`s, and every string literal (issue keys,
//! dates, nested queries) is quoted and escaped.

use chrono::NaiveDate;
use std::fmt;

/// Issue link direction understood by `linkedIssuesOf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    /// Issues that the subquery's issues block.
    Blocks,
    /// Issues that block the subquery's issues.
    IsBlockedBy,
}

impl LinkType {
    /// Link description as written in JQL.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::IsBlockedBy => "is blocked by",
        }
    }
}

/// A conjunction of JQL clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Jql {
    clauses: Vec<String>,
}

impl Jql {
    /// Creates an empty query, which matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a query from a user-supplied filter.
    #[must_use]
    pub fn filter(raw: &str) -> Self {
        Self::new().and_filter(raw)
    }

    /// Adds a raw JQL fragment, parenthesized. Blank fragments are ignored.
    #[must_use]
    pub fn and_filter(mut self, raw: &str) -> Self {
        let raw = raw.trim();
        if !raw.is_empty() {
            self.clauses.push(format!("({raw})"));
        }
        self
    }

    /// Restricts the query to a single issue key.
    #[must_use]
    pub fn and_key(mut self, key: &str) -> Self {
        self.clauses.push(format!("key = {}", quote(key)));
        self
    }

    /// Excludes the given issue types.
    #[must_use]
    pub fn and_type_not_in(mut self, types: &[&str]) -> Self {
        let list = types.iter().map(|t| quote(t)).collect::<Vec<_>>().join(", ");
        self.clauses.push(format!("type NOT IN ({list})"));
        self
    }

    /// Keeps only issues whose status category is not Done.
    #[must_use]
    pub fn and_not_done(mut self) -> Self {
        self.clauses.push(NOT_DONE.to_string());
        self
    }

    /// Keeps issues that are still open or were resolved after `boundary`.
    #[must_use]
    pub fn and_open_or_resolved_after(mut self, boundary: NaiveDate) -> Self {
        self.clauses.push(format!(
            "({NOT_DONE} OR resolutionDate > {})",
            quote(&boundary.format("%Y-%m-%d").to_string())
        ));
        self
    }

    /// Keeps issues linked to the result of `subquery` through `link`.
    ///
    /// Uses the ScriptRunner `issueFunction in linkedIssuesOf(...)` extension.
    #[must_use]
    pub fn and_linked_issues_of(mut self, subquery: &Jql, link: LinkType) -> Self {
        self.clauses.push(format!(
            "issueFunction in linkedIssuesOf({}, {})",
            quote(&subquery.build()),
            quote(link.as_str())
        ));
        self
    }

    /// Renders the query text.
    #[must_use]
    pub fn build(&self) -> String {
        self.clauses.join(" AND ")
    }
}

impl fmt::Display for Jql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

const NOT_DONE: &str = "statusCategory != Done";

/// Quotes a JQL string literal.
#[must_use]
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
