//! Output module for audit results and reports
//!
//! This module handles:
//! - Writing and reading the JSON results file
//! - Analyzing results for SEO, performance and accessibility issues
//! - Writing the issue CSV and the markdown summary
//! - Computing and printing result statistics

pub mod analysis;
mod csv;
mod json;
mod markdown;
pub mod stats;
mod traits;

pub use analysis::{analyze, Issue, Severity};
pub use csv::{format_issues_csv, write_issues_csv};
pub use json::{read_results, write_results, JsonFileSink};
pub use markdown::{count_issues, format_summary_markdown, write_summary_markdown};
pub use stats::{load_statistics, print_statistics, ResultStatistics};
pub use traits::{OutputError, OutputResult, ResultSink};

use crate::config::Config;
use std::path::Path;

/// Reads the results file and writes the issue CSV and markdown summary
///
/// # Returns
///
/// * `Ok(Vec<Issue>)` - The issues that were written
/// * `Err(OutputError)` - Failed to read results or write a report
pub fn generate_reports(config: &Config) -> OutputResult<Vec<Issue>> {
    let records = read_results(Path::new(&config.output.results_path))?;
    tracing::info!(
        "Analyzing {} records from {}",
        records.len(),
        config.output.results_path
    );

    let issues = analyze(&records, &config.budgets);

    write_issues_csv(&issues, Path::new(&config.output.issues_path))?;
    write_summary_markdown(&records, &issues, Path::new(&config.output.summary_path))?;

    tracing::info!(
        "[analyze] Wrote {} and {}",
        config.output.issues_path,
        config.output.summary_path
    );

    Ok(issues)
}
