//! Batch driver - main audit orchestration logic
//!
//! This module contains the audit loop that ties the pieces together:
//! - Fetching robots.txt for the sitemap's origin
//! - Resolving the sitemap into page URLs
//! - Filtering URLs through the robots rules
//! - Auditing pages sequentially with a fixed delay
//! - Checkpointing results through a [`ResultSink`]

use crate::config::Config;
use crate::crawler::auditor::PageAuditor;
use crate::crawler::fetcher::{build_http_client, build_probe_client};
use crate::crawler::record::UrlAudit;
use crate::output::{JsonFileSink, ResultSink};
use crate::robots::{fetch_robots, RobotsRules};
use crate::sitemap::gather_urls;
use crate::url::url_path;
use crate::AuditError;
use reqwest::Client;
use std::path::Path;
use std::time::{Duration, Instant};
use url::Url;

/// The URLs a run will audit, and how they were chosen
#[derive(Debug, Clone, PartialEq)]
pub struct AuditPlan {
    /// Rules of the `User-Agent: *` group (empty if robots.txt was unavailable)
    pub rules: RobotsRules,

    /// Every URL the sitemap yielded, in discovery order
    pub discovered: Vec<String>,

    /// URLs permitted by the rules, capped at `max-urls`
    pub allowed: Vec<String>,
}

impl AuditPlan {
    /// Number of discovered URLs dropped by the rules
    pub fn disallowed_count(&self) -> usize {
        self.discovered
            .iter()
            .filter(|url| !path_allowed(&self.rules, url))
            .count()
    }
}

/// Main audit coordinator
pub struct Coordinator {
    config: Config,
    client: Client,
    auditor: PageAuditor,
}

impl Coordinator {
    /// Creates a coordinator with freshly built HTTP clients
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to plan and run
    /// * `Err(AuditError)` - An HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, AuditError> {
        let client = build_http_client(&config)?;
        let probe_client = build_probe_client(&config)?;
        let auditor = PageAuditor::new(client.clone(), probe_client, &config);

        Ok(Self {
            config,
            client,
            auditor,
        })
    }

    /// Resolves robots rules and the sitemap into the list of URLs to audit
    ///
    /// # Returns
    ///
    /// * `Ok(AuditPlan)` - The plan
    /// * `Err(AuditError)` - The start URL is invalid or the root sitemap failed
    pub async fn plan(&self) -> Result<AuditPlan, AuditError> {
        let start_url = Url::parse(&self.config.crawl.start_url)?;
        let max_urls = self.config.crawl.max_urls;

        let rules = fetch_robots(&self.client, &start_url).await;
        let discovered = gather_urls(&self.client, &start_url, max_urls).await?;

        let matcher = rules.matcher();
        let mut allowed: Vec<String> = discovered
            .iter()
            .filter(|url| url_path(url).map_or(true, |path| matcher.is_allowed(&path)))
            .cloned()
            .collect();
        allowed.truncate(max_urls);

        tracing::info!(
            "[sitemap-crawl] {} URLs in sitemap, {} allowed by robots.txt",
            discovered.len(),
            allowed.len()
        );

        Ok(AuditPlan {
            rules,
            discovered,
            allowed,
        })
    }

    /// Plans and audits every allowed URL
    ///
    /// # Arguments
    ///
    /// * `sink` - Receives checkpoints and the final result list
    pub async fn run(&self, sink: &mut dyn ResultSink) -> Result<Vec<UrlAudit>, AuditError> {
        let plan = self.plan().await?;
        self.audit_urls(&plan.allowed, sink).await
    }

    /// Audits `urls` strictly in order
    ///
    /// Sleeps the configured delay between requests. After every
    /// `checkpoint-every` pages the accumulated results go to
    /// [`ResultSink::checkpoint`]; once all pages are done they go to
    /// [`ResultSink::finalize`].
    pub async fn audit_urls(
        &self,
        urls: &[String],
        sink: &mut dyn ResultSink,
    ) -> Result<Vec<UrlAudit>, AuditError> {
        let total = urls.len();
        let delay = Duration::from_millis(self.config.crawl.request_delay_ms);
        let checkpoint_every = self.config.crawl.checkpoint_every.max(1);
        let start_time = Instant::now();

        let mut results = Vec::with_capacity(total);

        for (i, url) in urls.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            tracing::debug!("Auditing {}", url);
            let record = self.auditor.audit(url).await;
            if record.status.is_none() {
                tracing::warn!("No response from {}", url);
            }
            results.push(record);

            let done = i + 1;
            if done % checkpoint_every == 0 {
                sink.checkpoint(&results)?;
                tracing::info!("[sitemap-crawl] {}/{}", done, total);
            }
        }

        sink.finalize(&results)?;
        tracing::info!(
            "[sitemap-crawl] Done. {} pages in {:.1}s",
            results.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(results)
    }
}

fn path_allowed(rules: &RobotsRules, url: &str) -> bool {
    url_path(url).map_or(true, |path| rules.is_allowed(&path))
}

/// Runs a complete audit and writes results to the configured JSON file
///
/// This is the main entry point for an audit. It will:
/// 1. Build the HTTP client
/// 2. Fetch robots.txt and resolve the sitemap
/// 3. Audit every allowed page in order
/// 4. Write results every `checkpoint-every` pages and at the end
///
/// # Example
///
/// ```no_run
/// use sitemap_audit::config::load_config;
/// use sitemap_audit::crawler::run_audit;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("audit.toml"))?;
/// let results = run_audit(config).await?;
/// println!("{} pages audited", results.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_audit(config: Config) -> Result<Vec<UrlAudit>, AuditError> {
    let mut sink = JsonFileSink::new(Path::new(&config.output.results_path));
    let coordinator = Coordinator::new(config)?;
    let results = coordinator.run(&mut sink).await?;

    tracing::info!("Wrote {}", sink.path().display());
    Ok(results)
}
