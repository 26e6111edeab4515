//! Robots.txt handling module
//!
//! This module provides functionality for fetching and parsing robots.txt and
//! for deciding whether a URL path may be audited.

mod matcher;
mod parser;

pub use matcher::{path_matches, PathMatcher};
pub use parser::RobotsRules;

use crate::crawler::get_text;
use reqwest::Client;
use url::Url;

/// Fetches and parses robots.txt for the origin of `base`
///
/// Fails open: if the request fails or returns a non-success status, an empty
/// rule set (everything allowed) is returned.
///
/// # Arguments
///
/// * `client` - The HTTP client to use (carries the User-Agent)
/// * `base` - Any URL on the site; only its origin is used
///
/// # Returns
///
/// The rules of the `User-Agent: *` group
pub async fn fetch_robots(client: &Client, base: &Url) -> RobotsRules {
    let robots_url = match base.join("/robots.txt") {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Cannot build robots.txt URL from {}: {}", base, e);
            return RobotsRules::allow_all();
        }
    };

    match get_text(client, robots_url.as_str(), &[]).await {
        Ok(fetched) if fetched.is_success() => {
            let rules = RobotsRules::parse(&fetched.body);
            tracing::debug!(
                "robots.txt: {} allow, {} disallow rules",
                rules.allow.len(),
                rules.disallow.len()
            );
            rules
        }
        Ok(fetched) => {
            tracing::debug!(
                "robots.txt returned HTTP {}, allowing all paths",
                fetched.status
            );
            RobotsRules::allow_all()
        }
        Err(e) => {
            tracing::debug!("Failed to fetch robots.txt, allowing all paths: {}", e);
            RobotsRules::allow_all()
        }
    }
}
