//! Report summary types and helpers.

mod report_summary;

pub use report_summary::ReportSummary;
