//! Issue report as CSV
//!
//! Every field is double-quoted; embedded quotes are doubled. The `details`
//! column holds the issue details serialized as JSON.

use crate::output::analysis::Issue;
use crate::output::traits::{OutputError, OutputResult};
use std::fs;
use std::path::Path;

const HEADER: &str = "url,issue,severity,details";

/// Writes the issue report to `output_path`
pub fn write_issues_csv(issues: &[Issue], output_path: &Path) -> OutputResult<()> {
    let csv = format_issues_csv(issues);

    let write_err = |source: std::io::Error| OutputError::Write {
        path: output_path.display().to_string(),
        source,
    };
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(output_path, csv).map_err(write_err)?;

    Ok(())
}

/// Formats issues as CSV rows under a header line
///
/// Rows are joined with `\n` and there is no trailing newline.
pub fn format_issues_csv(issues: &[Issue]) -> String {
    let mut rows = Vec::with_capacity(issues.len() + 1);
    rows.push(HEADER.to_string());

    for issue in issues {
        let details = issue.details.to_string();
        let fields = [
            issue.url.as_str(),
            issue.issue.as_str(),
            issue.severity.as_str(),
            details.as_str(),
        ];
        rows.push(
            fields
                .iter()
                .map(|field| quote(field))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    rows.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
