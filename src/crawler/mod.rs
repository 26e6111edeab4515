//! Crawler module for page fetching and auditing
//!
//! This module contains the core audit logic, including:
//! - HTTP fetching for sitemaps, robots.txt, pages and asset sizes
//! - HTML parsing and SEO signal extraction
//! - The per-URL audit record
//! - Overall batch coordination

mod auditor;
mod coordinator;
mod fetcher;
mod parser;
mod record;

pub use auditor::{cap_assets, PageAuditor};
pub use coordinator::{run_audit, AuditPlan, Coordinator};
pub use fetcher::{
    build_http_client, build_probe_client, fetch_page, get_text, head_content_length,
    parse_content_length, FetchedText, PageFetch,
};
pub use parser::{parse_page, PageSignals};
pub use record::{Heading, HreflangLink, ImageRef, LinkedAsset, ScriptAsset, UrlAudit};
