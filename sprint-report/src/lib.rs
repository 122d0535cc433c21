#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod client;
pub mod config;
pub mod issues;
pub mod jql;
pub mod runner;
pub mod summary;
pub mod templates;
pub mod tracker;

pub use client::{Client, ClientError, Dependencies, IssueGroups};
pub use config::{load_field_map, ConfigError, FieldMap, TrackerConfig};
pub use issues::{Issue, IssueCache, IssueKey};
pub use jql::{Jql, LinkType};
pub use runner::{Report, ReportConfig, Runner, RunnerError};
pub use summary::ReportSummary;
pub use templates::{
    create_handlebars_registry, truncate, ReportData, ReportFormat, ReportMeta, ReportRenderer,
    ReportTemplate, TemplateError,
};
pub use tracker::{Assignee, IssueTracker, JiraTracker, RawIssue, TrackerError, PAGE_SIZE};
