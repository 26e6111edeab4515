//! Configuration module for Sitemap-Audit
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; command line flags and the `CRAWL_START_URL` /
//! `CRAWL_MAX_URLS` environment variables override the file.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("audit.toml")).unwrap();
//! println!("Auditing up to {} URLs", config.crawl.max_urls);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BudgetConfig, Config, CrawlConfig, LimitsConfig, OutputConfig, UserAgentConfig,
    DEFAULT_ACCEPT_LANGUAGE, DEFAULT_START_URL, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, resolve_config, ConfigOverrides};
pub use validation::validate;
