//! Analyzing a results file into the issue report and summary

use crate::common::test_config;
use sitemap_audit::crawler::UrlAudit;
use sitemap_audit::output::{generate_reports, load_statistics, write_results};
use std::fs;
use tempfile::tempdir;

fn records() -> Vec<UrlAudit> {
    let mut ok = UrlAudit::failed("https://example.com/en", Some(200), None);
    ok.title = Some("Home".to_string());
    ok.word_count = 120;

    vec![
        ok,
        UrlAudit::failed("https://example.com/missing", Some(404), None),
        UrlAudit::failed("https://example.com/down", None, None),
    ]
}

#[test]
fn test_generate_reports_writes_csv_and_summary() {
    let dir = tempdir().unwrap();
    let config = test_config("https://example.com/sitemap.xml", dir.path());
    write_results(dir.path().join("results.json").as_path(), &records()).unwrap();

    let issues = generate_reports(&config).unwrap();

    assert!(issues
        .iter()
        .any(|i| i.url == "https://example.com/missing" && i.issue == "HTTP 404"));
    assert!(!issues
        .iter()
        .any(|i| i.url == "https://example.com/en" && i.issue == "Missing title"));

    let csv = fs::read_to_string(&config.output.issues_path).unwrap();
    assert_eq!(csv.lines().next(), Some("url,issue,severity,details"));
    assert_eq!(csv.lines().count(), issues.len() + 1);
    assert!(csv.contains(r#""https://example.com/missing","HTTP 404","high","""""""#));

    let summary = fs::read_to_string(&config.output.summary_path).unwrap();
    assert!(summary.starts_with("# Crawl Summary\n\nPages: 3\n"));
    assert!(summary.contains("| 404 | 1 |"));
    assert!(summary.contains("## Issue counts"));
}

#[test]
fn test_generate_reports_without_results_file_fails() {
    let dir = tempdir().unwrap();
    let config = test_config("https://example.com/sitemap.xml", dir.path());
    assert!(generate_reports(&config).is_err());
}

#[test]
fn test_statistics_from_results_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.json");
    write_results(&path, &records()).unwrap();

    let stats = load_statistics(&path).unwrap();

    assert_eq!(stats.total_pages, 3);
    assert_eq!(stats.unreachable_pages, 1);
    assert_eq!(stats.status_counts.get(&200), Some(&1));
    assert!((stats.average_word_count - 60.0).abs() < 0.01);
}
