//! Runner configuration.

use crate::templates::{ReportMeta, ReportTemplate};
use chrono::NaiveDate;

/// Title used when none is given.
pub const DEFAULT_TITLE: &str = "Sprint Report";

/// Configuration for generating one report.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// JQL selecting the team's issues, e.g. `project = PROJ AND sprint in openSprints()`.
    filter: String,
    /// First day of the reporting period; issues resolved after it are included.
    start: NaiveDate,
    /// Last day of the reporting period.
    end: NaiveDate,
    /// Report heading.
    title: String,
    /// Template to render with.
    template: ReportTemplate,
}

impl ReportConfig {
    /// Creates a configuration with the default title and markdown template.
    pub fn new(filter: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            filter: filter.into(),
            start,
            end,
            title: DEFAULT_TITLE.to_string(),
            template: ReportTemplate::default(),
        }
    }

    /// Sets the report heading.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the template to render with.
    pub fn with_template(mut self, template: ReportTemplate) -> Self {
        self.template = template;
        self
    }

    /// Returns the JQL filter.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Returns the first day of the period.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the period.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns the report heading.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the template.
    pub fn template(&self) -> &ReportTemplate {
        &self.template
    }

    /// Title and period as handed to the template.
    pub fn meta(&self) -> ReportMeta {
        ReportMeta {
            title: self.title.clone(),
            start: self.start,
            end: self.end,
        }
    }
}
