//! Report rendering using Handlebars.
//!
//! Three templates ship with the crate (markdown, plain text, HTML); any
//! other Handlebars file can be used instead. See [`ReportRenderer::render`]
//! for the values a template can use.

mod error;
mod renderer;
mod view;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, truncate, ReportRenderer};
pub use view::{ReportData, ReportMeta, IN_PROGRESS};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Built-in report layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Markdown with issue links.
    #[default]
    Markdown,
    /// Plain text for terminals.
    Text,
    /// Standalone HTML page.
    Html,
}

impl ReportFormat {
    /// Canonical name of the format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Text => "text",
            Self::Html => "html",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Self::Markdown => include_str!("../../templates/report.md.hbs"),
            Self::Text => include_str!("../../templates/report.txt.hbs"),
            Self::Html => include_str!("../../templates/report.html.hbs"),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "text" | "txt" | "console" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            _ => Err(TemplateError::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

/// A report template and how its output is escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTemplate {
    name: String,
    source: String,
    escape_html: bool,
}

impl ReportTemplate {
    /// One of the templates shipped with the crate.
    #[must_use]
    pub fn builtin(format: ReportFormat) -> Self {
        Self {
            name: format.as_str().to_string(),
            source: format.source().to_string(),
            escape_html: format == ReportFormat::Html,
        }
    }

    /// A template given as text.
    pub fn from_source(name: impl Into<String>, source: impl Into<String>, escape_html: bool) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            escape_html,
        }
    }

    /// Loads a template file. Files ending in `.html` or `.htm` get HTML escaping.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::IoError`] if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map_or_else(|| "custom".to_string(), |n| n.to_string_lossy().to_string());
        let escape_html = path.extension().is_some_and(|ext| {
            ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm")
        }) || name.to_ascii_lowercase().contains(".html.");
        Ok(Self::from_source(name, source, escape_html))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether rendered values are HTML-escaped.
    pub fn escapes_html(&self) -> bool {
        self.escape_html
    }
}

impl Default for ReportTemplate {
    fn default() -> Self {
        Self::builtin(ReportFormat::default())
    }
}
