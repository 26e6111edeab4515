//! URL handling module for Sitemap-Audit
//!
//! This module provides relative URL resolution and order-preserving
//! de-duplication shared by the sitemap resolver and the page auditor.

mod resolve;

// Re-export main functions
pub use resolve::{dedupe_preserving_order, resolve_url, url_path};
