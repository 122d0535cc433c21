//! Orchestrates a report run: gather issues and dependencies, then render.

mod config;
mod error;

pub use config::{ReportConfig, DEFAULT_TITLE};
pub use error::RunnerError;

use crate::client::Client;
use crate::config::TrackerConfig;
use crate::summary::ReportSummary;
use crate::templates::{ReportData, ReportRenderer};
use crate::tracker::{IssueTracker, JiraTracker};
use std::path::Path;
use tracing::{info, warn};

/// A rendered report and its counts.
#[derive(Debug, Clone)]
pub struct Report {
    /// Rendered template output.
    pub text: String,
    /// Counts of what the report contains.
    pub summary: ReportSummary,
}

impl Report {
    /// Writes the rendered text to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Output`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), RunnerError> {
        std::fs::write(path, &self.text).map_err(|source| RunnerError::Output {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Report written");
        Ok(())
    }
}

/// Produces a report from a tracker.
pub struct Runner<T> {
    config: ReportConfig,
    client: Client<T>,
    renderer: ReportRenderer,
}

impl Runner<JiraTracker> {
    /// Builds a runner against the configured Jira instance.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the period is invalid, the template does not
    /// compile, or the HTTP client cannot be built.
    pub fn new(config: ReportConfig, tracker: TrackerConfig) -> Result<Self, RunnerError> {
        Self::with_client(config, Client::connect(tracker)?)
    }
}

impl<T: IssueTracker> Runner<T> {
    /// Builds a runner around an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidPeriod`] if the period ends before it
    /// starts, or [`RunnerError::Template`] if the template does not compile.
    pub fn with_client(config: ReportConfig, client: Client<T>) -> Result<Self, RunnerError> {
        if config.end() < config.start() {
            return Err(RunnerError::InvalidPeriod {
                start: config.start(),
                end: config.end(),
            });
        }
        let renderer = ReportRenderer::new(config.template())?;
        Ok(Self {
            config,
            client,
            renderer,
        })
    }

    /// Returns the client and the issues it has cached.
    pub fn client(&self) -> &Client<T> {
        &self.client
    }

    /// Executes the full flow.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] on the first failing search or render; no
    /// partial report is produced.
    pub async fn run(&mut self) -> Result<Report, RunnerError> {
        info!(
            filter = %self.config.filter(),
            start = %self.config.start(),
            end = %self.config.end(),
            template = %self.config.template().name(),
            "Building report"
        );

        let groups = self
            .client
            .gather_issues(self.config.filter(), self.config.start())
            .await?;
        let dependencies = self
            .client
            .gather_dependencies(self.config.filter())
            .await?;

        let summary = ReportSummary::new(&groups, &dependencies, self.client.cache().len());
        if summary.is_empty() {
            warn!("No issues matched the filter");
        }

        let meta = self.config.meta();
        let text = self.renderer.render(&ReportData {
            cache: self.client.cache(),
            groups: &groups,
            dependencies: &dependencies,
            meta: &meta,
        })?;

        info!(
            fetched = summary.issues_fetched,
            bytes = text.len(),
            "Report rendered"
        );
        Ok(Report { text, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn report() -> Report {
        Report {
            text: "# Sprint Report\n".to_string(),
            summary: ReportSummary::default(),
        }
    }

    #[test]
    fn save_writes_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.md");

        report().save(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Sprint Report\n");
    }

    #[test]
    fn save_reports_unwritable_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("report.md");

        let error = report().save(&path).unwrap_err();

        assert!(matches!(error, RunnerError::Output { path: p, .. } if p == path));
        assert!(!path.exists());
    }
}
