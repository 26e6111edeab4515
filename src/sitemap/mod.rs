//! Sitemap resolution module
//!
//! This module turns a sitemap URL into the ordered list of page URLs to
//! audit. A sitemap index is followed one level deep: each child sitemap is
//! fetched in order and its page entries are concatenated.

mod parser;

pub use parser::{parse_sitemap, ParsedSitemap, SitemapKind};

use crate::crawler::get_text;
use crate::url::{dedupe_preserving_order, resolve_url};
use crate::AuditError;
use reqwest::header::ACCEPT;
use reqwest::Client;
use url::Url;

/// Accept header for the root sitemap request
const ROOT_ACCEPT: &str = "application/xml,text/xml;q=0.9,*/*;q=0.8";

/// Accept header for child sitemap requests
const CHILD_ACCEPT: &str = "application/xml";

/// Resolves a sitemap into a de-duplicated list of page URLs
///
/// # Behavior
///
/// - The root sitemap must be fetched successfully; a transport error or a
///   non-2xx status aborts with an error.
/// - For a sitemap index, children are fetched sequentially. Children that
///   fail or return a non-2xx status are skipped, as are nested indexes.
///   Fetching stops once the collected entry count reaches `max_urls`.
/// - Every entry is resolved against `start_url`; unresolvable entries are
///   dropped. Duplicates are removed keeping the first occurrence, and the
///   list is truncated to `max_urls`.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `start_url` - URL of the sitemap or sitemap index
/// * `max_urls` - Maximum number of URLs to return
pub async fn gather_urls(
    client: &Client,
    start_url: &Url,
    max_urls: usize,
) -> Result<Vec<String>, AuditError> {
    let root = get_text(client, start_url.as_str(), &[(ACCEPT, ROOT_ACCEPT)]).await?;
    if !root.is_success() {
        return Err(AuditError::SitemapStatus {
            url: start_url.to_string(),
            status: root.status,
        });
    }

    let parsed = parse_sitemap(&root.body);
    let entries = match parsed.kind {
        SitemapKind::UrlSet => parsed.locations,
        SitemapKind::Index => {
            tracing::info!(
                "Sitemap index with {} child sitemaps",
                parsed.locations.len()
            );
            gather_from_children(client, start_url, &parsed.locations, max_urls).await
        }
    };

    let resolved = entries
        .iter()
        .filter_map(|entry| {
            let url = resolve_url(start_url, entry);
            if url.is_none() {
                tracing::debug!("Skipping unresolvable sitemap entry {:?}", entry);
            }
            url
        })
        .collect::<Vec<_>>();

    let mut urls = dedupe_preserving_order(resolved);
    urls.truncate(max_urls);

    tracing::info!("Sitemap resolved to {} URLs", urls.len());
    Ok(urls)
}

/// Fetches child sitemaps of an index and concatenates their page entries
async fn gather_from_children(
    client: &Client,
    start_url: &Url,
    children: &[String],
    max_urls: usize,
) -> Vec<String> {
    let mut entries = Vec::new();

    for child in children {
        let Some(child_url) = resolve_url(start_url, child) else {
            tracing::debug!("Skipping unresolvable child sitemap {:?}", child);
            continue;
        };

        match get_text(client, &child_url, &[(ACCEPT, CHILD_ACCEPT)]).await {
            Ok(fetched) if fetched.is_success() => {
                let parsed = parse_sitemap(&fetched.body);
                if parsed.kind == SitemapKind::Index {
                    tracing::debug!("Skipping nested sitemap index {}", child_url);
                    continue;
                }
                tracing::debug!(
                    "Child sitemap {} lists {} URLs",
                    child_url,
                    parsed.locations.len()
                );
                entries.extend(parsed.locations);
            }
            Ok(fetched) => {
                tracing::debug!(
                    "Skipping child sitemap {}: HTTP {}",
                    child_url,
                    fetched.status
                );
                continue;
            }
            Err(e) => {
                tracing::debug!("Skipping child sitemap {}: {}", child_url, e);
                continue;
            }
        }

        if entries.len() >= max_urls {
            break;
        }
    }

    entries
}
