//! Results analysis
//!
//! Turns audit records into a flat list of SEO, performance and accessibility
//! issues. Size budgets compare estimated compressed sizes: HEAD requests
//! report transfer sizes that may or may not be compressed, so the raw byte
//! totals are scaled by a fixed gzip ratio.

use crate::config::BudgetConfig;
use crate::crawler::UrlAudit;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fmt;

/// Maximum title length before it is likely truncated in search results
const MAX_TITLE_CHARS: usize = 60;

/// Acceptable meta description length range
const DESCRIPTION_CHARS: std::ops::RangeInclusive<usize> = 120..=170;

/// Number of leading images treated as above the fold
const ABOVE_FOLD_IMAGES: usize = 6;

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A problem found on one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub url: String,
    /// Human-readable label, e.g. `Title too long (72)`
    pub issue: String,
    pub severity: Severity,
    /// Extra context; an empty string when there is none
    pub details: Value,
}

/// Collects issues for one page
struct IssueCollector<'a> {
    url: &'a str,
    issues: &'a mut Vec<Issue>,
}

impl IssueCollector<'_> {
    fn add(&mut self, issue: impl Into<String>, severity: Severity) {
        self.add_with_details(issue, severity, Value::String(String::new()));
    }

    fn add_with_details(&mut self, issue: impl Into<String>, severity: Severity, details: Value) {
        self.issues.push(Issue {
            url: self.url.to_string(),
            issue: issue.into(),
            severity,
            details,
        });
    }
}

/// Analyzes every record and returns the issues in record order
pub fn analyze(records: &[UrlAudit], budgets: &BudgetConfig) -> Vec<Issue> {
    let mut issues = Vec::new();
    for record in records {
        analyze_record(record, budgets, &mut issues);
    }
    issues
}

fn analyze_record(record: &UrlAudit, budgets: &BudgetConfig, issues: &mut Vec<Issue>) {
    let mut out = IssueCollector {
        url: &record.url,
        issues,
    };

    // Status
    if let Some(status) = record.status.filter(|s| *s >= 400) {
        out.add(format!("HTTP {}", status), Severity::High);
    }

    // Title and meta description
    match record.title.as_deref().map(str::trim) {
        None | Some("") => out.add("Missing title", Severity::High),
        Some(_) => {
            let len = char_len(record.title.as_deref());
            if len > MAX_TITLE_CHARS {
                out.add(format!("Title too long ({})", len), Severity::Low);
            }
        }
    }

    match record.description.as_deref().map(str::trim) {
        None | Some("") => out.add("Missing meta description", Severity::Medium),
        Some(_) => {
            let len = char_len(record.description.as_deref());
            if !DESCRIPTION_CHARS.contains(&len) {
                out.add(
                    format!("Meta description suboptimal ({})", len),
                    Severity::Low,
                );
            }
        }
    }

    // Headings
    if record.h1.is_none() {
        out.add("Missing H1", Severity::High);
    }
    let h1_count = record.h1_count();
    if h1_count > 1 {
        out.add(format!("Multiple H1s ({})", h1_count), Severity::Medium);
    }

    // Size budgets
    let js_total = estimate_gzip(record.js.iter().map(|a| a.bytes), budgets.gzip_ratio);
    let css_total = estimate_gzip(record.css.iter().map(|a| a.bytes), budgets.gzip_ratio);
    let fonts_total = estimate_gzip(record.fonts.iter().map(|a| a.bytes), budgets.gzip_ratio);
    let above_fold: u64 = record
        .images
        .iter()
        .take(ABOVE_FOLD_IMAGES)
        .filter_map(|i| i.bytes)
        .sum();

    if js_total > budgets.js_gzip_bytes {
        out.add_with_details(
            format!("JS over budget ({} gz)", js_total),
            Severity::High,
            json!({ "budget": budgets.js_gzip_bytes }),
        );
    }
    if css_total > budgets.css_gzip_bytes {
        out.add_with_details(
            format!("CSS over budget ({} gz)", css_total),
            Severity::Medium,
            json!({ "budget": budgets.css_gzip_bytes }),
        );
    }
    if fonts_total > budgets.fonts_gzip_bytes {
        out.add(format!("Fonts heavy ({} gz)", fonts_total), Severity::Low);
    }
    if above_fold > budgets.above_fold_image_bytes {
        out.add(
            format!("Above-the-fold images heavy ({})", above_fold),
            Severity::High,
        );
    }

    // hreflang and canonical
    if record.canonical.is_none() {
        out.add("Missing canonical", Severity::Medium);
    }
    let langs: HashSet<&str> = record.hreflang.iter().map(|h| h.lang.as_str()).collect();
    if !budgets
        .required_hreflang
        .iter()
        .all(|lang| langs.contains(lang.as_str()))
    {
        out.add("Incomplete hreflang set", Severity::Medium);
    }

    // Accessibility basics
    let missing_alt = record
        .images
        .iter()
        .filter(|i| i.alt.as_deref().map_or(true, str::is_empty))
        .count();
    if missing_alt > 0 {
        out.add(format!("Images missing alt ({})", missing_alt), Severity::High);
    }
    if record.lang.is_none() {
        out.add("Missing html lang", Severity::High);
    }
}

fn char_len(value: Option<&str>) -> usize {
    value.map_or(0, |v| v.chars().count())
}

/// Sums known sizes and scales them by the gzip ratio, rounding to bytes
pub fn estimate_gzip<I>(sizes: I, ratio: f64) -> u64
where
    I: IntoIterator<Item = Option<u64>>,
{
    let total: u64 = sizes.into_iter().flatten().sum();
    (total as f64 * ratio).round() as u64
}
