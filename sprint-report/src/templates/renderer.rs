//! Report renderer.

use super::view::{ReportData, ReportView};
use super::{ReportTemplate, TemplateError};
use handlebars::{handlebars_helper, html_escape, no_escape, Handlebars};

/// Marker appended to truncated text.
const ELLIPSIS: &str = "...";

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - HTML escaping only when `escape_html` is set (markdown and plain text
///   are emitted verbatim)
/// - Strict mode (catches missing variables)
/// - `truncate` helper for shortening long summaries
#[must_use]
pub fn create_handlebars_registry(escape_html: bool) -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    if escape_html {
        hbs.register_escape_fn(html_escape);
    } else {
        hbs.register_escape_fn(no_escape);
    }

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    hbs.register_helper("truncate", Box::new(truncate_helper));

    hbs
}

// Usage: `{{truncate summary 60}}`
handlebars_helper!(truncate_helper: |text: str, length: u64| {
    truncate(text, usize::try_from(length).unwrap_or(usize::MAX))
});

/// Shortens `text` to at most `length` characters.
///
/// Text longer than `length` keeps its first `length - 3` characters followed
/// by `...`; shorter text is returned unchanged. A `length` too small to fit
/// the ellipsis cuts the text to `length` characters without one.
#[must_use]
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }
    if length < ELLIPSIS.len() {
        return text.chars().take(length).collect();
    }
    let mut out: String = text.chars().take(length - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Renders reports with one compiled template.
pub struct ReportRenderer {
    handlebars: Handlebars<'static>,
    name: String,
}

impl ReportRenderer {
    /// Compiles `template` into a new renderer.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RegistrationError`] if the template does not parse.
    pub fn new(template: &ReportTemplate) -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry(template.escapes_html());
        handlebars.register_template_string(template.name(), template.source())?;
        Ok(Self {
            handlebars,
            name: template.name().to_string(),
        })
    }

    /// Renders the report.
    ///
    /// The template sees `title`, `start`, `end`, and the issue lists
    /// `issues`, `epics`, `features`, `incoming` and `outgoing`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RenderError`] if rendering fails, e.g. when
    /// the template references a value that does not exist.
    pub fn render(&self, data: &ReportData<'_>) -> Result<String, TemplateError> {
        let view = ReportView::build(data);
        Ok(self.handlebars.render(&self.name, &view)?)
    }
}
