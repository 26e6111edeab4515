//! Integration tests for Sitemap-Audit
//!
//! These tests use wiremock to serve robots.txt, sitemaps and pages, and
//! drive the public API end-to-end.

mod common;
mod crawl_tests;
mod report_tests;
mod robots_tests;
mod sitemap_tests;
