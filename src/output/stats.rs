//! Statistics over a results file
//!
//! This module provides functionality for summarizing audit records and
//! printing the summary for the `--stats` mode.

use crate::crawler::UrlAudit;
use crate::output::json::read_results;
use crate::output::traits::OutputResult;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Audit statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStatistics {
    /// Total number of audited pages
    pub total_pages: usize,

    /// Pages per HTTP status code
    pub status_counts: BTreeMap<u16, usize>,

    /// Pages with no status (request failed before a response)
    pub unreachable_pages: usize,

    /// Mean word count over pages that returned a response
    pub average_word_count: f64,

    /// JSON-LD type frequencies, most common first
    pub schema_type_counts: Vec<(String, usize)>,

    /// Pages without a `<title>`
    pub pages_missing_title: usize,

    /// Pages without a meta description
    pub pages_missing_description: usize,
}

impl ResultStatistics {
    /// Computes statistics from audit records
    pub fn from_results(records: &[UrlAudit]) -> Self {
        let mut stats = Self {
            total_pages: records.len(),
            ..Self::default()
        };

        let mut schema_counts: HashMap<&str, usize> = HashMap::new();
        let mut word_total = 0usize;
        let mut responded = 0usize;

        for record in records {
            match record.status {
                Some(status) => {
                    *stats.status_counts.entry(status).or_insert(0) += 1;
                    word_total += record.word_count;
                    responded += 1;
                }
                None => stats.unreachable_pages += 1,
            }

            if record.title.is_none() {
                stats.pages_missing_title += 1;
            }
            if record.description.is_none() {
                stats.pages_missing_description += 1;
            }

            for schema_type in &record.schema_types {
                *schema_counts.entry(schema_type.as_str()).or_insert(0) += 1;
            }
        }

        if responded > 0 {
            stats.average_word_count = word_total as f64 / responded as f64;
        }

        let mut schema_type_counts: Vec<(String, usize)> = schema_counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        schema_type_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats.schema_type_counts = schema_type_counts;

        stats
    }
}

/// Loads statistics from a results file
pub fn load_statistics(path: &Path) -> OutputResult<ResultStatistics> {
    let records = read_results(path)?;
    Ok(ResultStatistics::from_results(&records))
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &ResultStatistics) {
    println!("=== Audit Statistics ===\n");

    println!("Total pages: {}", stats.total_pages);
    println!("Unreachable pages: {}", stats.unreachable_pages);
    println!("Average word count: {:.0}", stats.average_word_count);
    println!("Missing title: {}", stats.pages_missing_title);
    println!("Missing description: {}", stats.pages_missing_description);

    if !stats.status_counts.is_empty() {
        println!("\nPages by status:");
        for (status, count) in &stats.status_counts {
            println!("  {:>3}: {}", status, count);
        }
    }

    if !stats.schema_type_counts.is_empty() {
        println!("\nSchema types:");
        for (name, count) in &stats.schema_type_counts {
            println!("  {}: {}", name, count);
        }
    }
}
