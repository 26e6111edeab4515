//! Page auditor
//!
//! Fetches one page, extracts its SEO signals, and HEAD-probes the sizes of
//! its stylesheets, scripts and fonts. Failures never propagate: a page that
//! cannot be fetched becomes a partial record, an asset that cannot be probed
//! gets `bytes: null`.

use crate::config::{Config, LimitsConfig};
use crate::crawler::fetcher::{fetch_page, head_content_length, PageFetch};
use crate::crawler::parser::{parse_page, PageSignals};
use crate::crawler::record::{LinkedAsset, ScriptAsset, UrlAudit};
use crate::url::dedupe_preserving_order;
use reqwest::Client;
use url::Url;

/// Audits pages with a shared client and fixed settings
#[derive(Debug, Clone)]
pub struct PageAuditor {
    client: Client,
    probe_client: Client,
    accept_language: String,
    limits: LimitsConfig,
}

impl PageAuditor {
    /// Creates an auditor from the run configuration
    ///
    /// `client` fetches pages; `probe_client` sends the asset HEAD requests
    /// and should come from [`build_probe_client`](crate::crawler::build_probe_client).
    pub fn new(client: Client, probe_client: Client, config: &Config) -> Self {
        Self {
            client,
            probe_client,
            accept_language: config.user_agent.accept_language.clone(),
            limits: config.limits.clone(),
        }
    }

    /// Audits a single URL
    ///
    /// # Returns
    ///
    /// Always a record. If the request fails, `status` and `final_url` hold
    /// whatever was received before the failure and all content fields are empty.
    pub async fn audit(&self, url: &str) -> UrlAudit {
        let (status, final_url, body) =
            match fetch_page(&self.client, url, &self.accept_language).await {
                PageFetch::Success {
                    status,
                    final_url,
                    body,
                } => (status, final_url, body),
                PageFetch::BodyError {
                    status,
                    final_url,
                    error,
                } => {
                    tracing::warn!("Failed to read body of {}: {}", url, error);
                    return UrlAudit::failed(url, Some(status), Some(final_url));
                }
                PageFetch::NetworkError { error } => {
                    tracing::warn!("Failed to fetch {}: {}", url, error);
                    return UrlAudit::failed(url, None, None);
                }
            };

        let base_url = match Url::parse(&final_url) {
            Ok(base_url) => base_url,
            Err(e) => {
                tracing::warn!("Unusable final URL {} for {}: {}", final_url, url, e);
                return UrlAudit::failed(url, Some(status), Some(final_url));
            }
        };

        // Parsed synchronously so the DOM is dropped before the HEAD probes
        let signals = parse_page(&body, &base_url);

        self.build_record(url, status, final_url, signals).await
    }

    async fn build_record(
        &self,
        url: &str,
        status: u16,
        final_url: String,
        signals: PageSignals,
    ) -> UrlAudit {
        let mut css = Vec::new();
        for href in cap_assets(signals.stylesheets, self.limits.max_css) {
            let bytes = head_content_length(&self.probe_client, &href).await;
            css.push(LinkedAsset { href, bytes });
        }

        let mut js = Vec::new();
        for src in cap_assets(signals.scripts, self.limits.max_js) {
            let bytes = head_content_length(&self.probe_client, &src).await;
            js.push(ScriptAsset { src, bytes });
        }

        let mut fonts = Vec::new();
        for href in cap_assets(signals.fonts, self.limits.max_fonts) {
            let bytes = head_content_length(&self.probe_client, &href).await;
            fonts.push(LinkedAsset { href, bytes });
        }

        let mut images = signals.images;
        for image in images.iter_mut().take(self.limits.max_images_probed) {
            image.bytes = head_content_length(&self.probe_client, &image.src).await;
        }

        UrlAudit {
            url: url.to_string(),
            status: Some(status),
            final_url: Some(final_url),
            title: signals.title,
            description: signals.description,
            h1: signals.h1,
            headings: signals.headings,
            word_count: signals.word_count,
            images,
            css,
            js,
            fonts,
            schema_types: signals.schema_types,
            hreflang: signals.hreflang,
            canonical: signals.canonical,
            meta_robots: signals.meta_robots,
            open_graph: signals.open_graph,
            lang: signals.lang,
        }
    }
}

/// De-duplicates asset URLs and keeps at most `max` of them
pub fn cap_assets(urls: Vec<String>, max: usize) -> Vec<String> {
    let mut unique = dedupe_preserving_order(urls);
    unique.truncate(max);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::{build_http_client, build_probe_client};

    #[test]
    fn test_cap_assets_dedupes_before_capping() {
        let urls = vec!["a", "b", "a", "c", "d"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(cap_assets(urls, 3), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cap_assets_zero() {
        let urls = vec!["a".to_string()];
        assert!(cap_assets(urls, 0).is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_page_yields_partial_record() {
        let config = Config::default();
        let auditor = PageAuditor::new(
            build_http_client(&config).unwrap(),
            build_probe_client(&config).unwrap(),
            &config,
        );

        let record = auditor.audit("http://127.0.0.1:1/page").await;

        assert_eq!(record.url, "http://127.0.0.1:1/page");
        assert_eq!(record.status, None);
        assert_eq!(record.final_url, None);
        assert_eq!(record.title, None);
        assert_eq!(record.description, None);
        assert_eq!(record.h1, None);
        assert_eq!(record.canonical, None);
        assert_eq!(record.meta_robots, None);
        assert_eq!(record.lang, None);
        assert!(record.headings.is_empty());
        assert!(record.css.is_empty());
    }
}
