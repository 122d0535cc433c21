//! CLI for the sprint report.
//!
//! Queries Jira for a team's sprint work, rolls it up to epics and features,
//! lists cross-team blockers and prints the rendered report.

use chrono::{Local, NaiveDate};
use clap::Parser;
use sprint_report::{
    load_field_map, ReportConfig, ReportFormat, ReportSummary, ReportTemplate, Runner,
    RunnerError, TrackerConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Sprint Report - Summarize a sprint's Jira issues by feature and epic.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JQL selecting the team's issues, e.g. "project = PROJ AND component = Backend".
    #[arg(long)]
    filter: String,

    /// First day of the sprint (YYYY-MM-DD). Issues resolved after it are included.
    #[arg(long)]
    start: NaiveDate,

    /// Last day of the sprint (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Report heading.
    #[arg(long, default_value = sprint_report::runner::DEFAULT_TITLE)]
    title: String,

    /// Built-in template to render with: markdown, text or html.
    #[arg(long, default_value_t = ReportFormat::Markdown)]
    format: ReportFormat,

    /// Custom Handlebars template; overrides --format.
    #[arg(long)]
    template: Option<PathBuf>,

    /// TOML file overriding the Jira custom field ids.
    #[arg(long, default_value = "sprint-report.toml")]
    fields_config: PathBuf,

    /// Jira base URL [default: $JIRA_URL or https://issues.redhat.com].
    #[arg(long)]
    url: Option<String>,

    /// Jira personal access token [default: $JIRA_TOKEN].
    #[arg(long)]
    token: Option<String>,

    /// Write the report to a file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output) on stderr, keeping stdout
///   free for the report
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<(), RunnerError> {
    let mut tracker = TrackerConfig::resolve(args.url, args.token)?;
    if let Some(fields) = load_field_map(&args.fields_config)? {
        info!(path = %args.fields_config.display(), "Loaded custom field ids");
        tracker = tracker.with_fields(fields);
    }

    let template = match &args.template {
        Some(path) => ReportTemplate::from_file(path)?,
        None => ReportTemplate::builtin(args.format),
    };
    let end = args.end.unwrap_or_else(|| Local::now().date_naive());
    let config = ReportConfig::new(args.filter, args.start, end)
        .with_title(args.title)
        .with_template(template);

    let mut runner = Runner::new(config, tracker)?;
    let report = runner.run().await?;
    match &args.output {
        Some(path) => report.save(path)?,
        None => print!("{}", report.text),
    }
    print_summary(&report.summary);
    Ok(())
}

/// Prints the report counts to stderr.
fn print_summary(summary: &ReportSummary) {
    eprintln!("\nSummary:");
    eprintln!("  Features: {}", summary.features);
    eprintln!("  Epics without a feature: {}", summary.epics);
    eprintln!("  Other issues: {}", summary.issues);
    eprintln!("  Blocked by: {}", summary.incoming);
    eprintln!("  Blocking: {}", summary.outgoing);
    eprintln!("  Issues fetched: {}", summary.issues_fetched);
}
