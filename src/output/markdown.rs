//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of an analyzed
//! results file: page counts, status breakdown and issue frequencies.

use crate::crawler::UrlAudit;
use crate::output::analysis::{Issue, Severity};
use crate::output::stats::ResultStatistics;
use crate::output::traits::{OutputError, OutputResult};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Generates a markdown summary and writes it to `output_path`
///
/// # Arguments
///
/// * `records` - The audited pages
/// * `issues` - Issues found by the analyzer
/// * `output_path` - Path where the markdown file should be written
pub fn write_summary_markdown(
    records: &[UrlAudit],
    issues: &[Issue],
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_summary_markdown(records, issues, Utc::now())?;

    let write_err = |source: std::io::Error| OutputError::Write {
        path: output_path.display().to_string(),
        source,
    };
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(output_path, markdown).map_err(write_err)?;

    Ok(())
}

/// Counts issues by label, most frequent first
///
/// Labels with equal counts keep the order in which they were first seen.
pub fn count_issues(issues: &[Issue]) -> Vec<(String, Severity, usize)> {
    let mut order: Vec<(String, Severity, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for issue in issues {
        match index.get(issue.issue.as_str()) {
            Some(&i) => order[i].2 += 1,
            None => {
                index.insert(issue.issue.as_str(), order.len());
                order.push((issue.issue.clone(), issue.severity, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among ties
    order.sort_by(|a, b| b.2.cmp(&a.2));
    order
}

/// Formats the summary as markdown
pub fn format_summary_markdown(
    records: &[UrlAudit],
    issues: &[Issue],
    generated_at: DateTime<Utc>,
) -> OutputResult<String> {
    let stats = ResultStatistics::from_results(records);
    let mut md = String::new();

    write_summary(&mut md, &stats, issues, generated_at)
        .map_err(|e| OutputError::Format(e.to_string()))?;

    Ok(md)
}

fn write_summary(
    md: &mut String,
    stats: &ResultStatistics,
    issues: &[Issue],
    generated_at: DateTime<Utc>,
) -> std::fmt::Result {
    writeln!(md, "# Crawl Summary")?;
    writeln!(md)?;
    writeln!(md, "Pages: {}", stats.total_pages)?;
    writeln!(md)?;
    writeln!(md, "- **Generated**: {}", generated_at.to_rfc3339())?;
    writeln!(md, "- **Unreachable pages**: {}", stats.unreachable_pages)?;
    writeln!(md, "- **Average word count**: {:.0}", stats.average_word_count)?;
    writeln!(md, "- **Total issues**: {}", issues.len())?;
    writeln!(md)?;

    if !stats.status_counts.is_empty() {
        writeln!(md, "## Status Codes")?;
        writeln!(md)?;
        writeln!(md, "| Status | Pages |")?;
        writeln!(md, "|--------|-------|")?;
        for (status, count) in &stats.status_counts {
            writeln!(md, "| {} | {} |", status, count)?;
        }
        writeln!(md)?;
    }

    writeln!(md, "## Issue counts")?;
    writeln!(md)?;
    for (label, severity, count) in count_issues(issues) {
        writeln!(md, "- {}: {} ({})", label, count, severity)?;
    }

    Ok(())
}
