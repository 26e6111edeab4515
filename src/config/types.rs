use serde::Deserialize;

/// Default sitemap crawled when neither the config nor the environment names one
pub const DEFAULT_START_URL: &str = "https://akrin.jp/sitemap.xml";

/// Desktop browser User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

/// Languages requested when fetching pages (the audited site is bilingual)
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,ja;q=0.8";

/// Main configuration structure for Sitemap-Audit
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub limits: LimitsConfig,
    pub output: OutputConfig,
    pub budgets: BudgetConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Sitemap (or sitemap index) URL to start from
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Maximum number of URLs taken from the sitemap and audited
    #[serde(rename = "max-urls")]
    pub max_urls: usize,

    /// Fixed pause between page audits (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Write the results file after this many audited pages
    #[serde(rename = "checkpoint-every")]
    pub checkpoint_every: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            max_urls: 2000,
            request_delay_ms: 200,
            checkpoint_every: 5,
            request_timeout_secs: 30,
        }
    }
}

/// Request identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// User-Agent header value
    pub value: String,

    /// Accept-Language header value sent with page requests
    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

/// Caps on per-page asset probing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    #[serde(rename = "max-css")]
    pub max_css: usize,

    #[serde(rename = "max-js")]
    pub max_js: usize,

    #[serde(rename = "max-fonts")]
    pub max_fonts: usize,

    /// Number of leading images to HEAD-probe (0 disables image probing)
    #[serde(rename = "max-images-probed")]
    pub max_images_probed: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_css: 20,
            max_js: 30,
            max_fonts: 10,
            max_images_probed: 0,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the JSON results file
    #[serde(rename = "results-path")]
    pub results_path: String,

    /// Path to the issues CSV written by the analyzer
    #[serde(rename = "issues-path")]
    pub issues_path: String,

    /// Path to the markdown summary written by the analyzer
    #[serde(rename = "summary-path")]
    pub summary_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: "crawl-results/sitemap-crawl.json".to_string(),
            issues_path: "crawl-results/issues.csv".to_string(),
            summary_path: "crawl-results/summary.md".to_string(),
        }
    }
}

/// Thresholds used when analyzing a results file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    #[serde(rename = "js-gzip-bytes")]
    pub js_gzip_bytes: u64,

    #[serde(rename = "css-gzip-bytes")]
    pub css_gzip_bytes: u64,

    #[serde(rename = "fonts-gzip-bytes")]
    pub fonts_gzip_bytes: u64,

    /// Combined size of the first six images
    #[serde(rename = "above-fold-image-bytes")]
    pub above_fold_image_bytes: u64,

    /// Estimated compressed/uncompressed ratio for text assets
    #[serde(rename = "gzip-ratio")]
    pub gzip_ratio: f64,

    /// hreflang values every page is expected to declare
    #[serde(rename = "required-hreflang")]
    pub required_hreflang: Vec<String>,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            js_gzip_bytes: 180_000,
            css_gzip_bytes: 60_000,
            fonts_gzip_bytes: 120_000,
            above_fold_image_bytes: 200_000,
            gzip_ratio: 0.35,
            required_hreflang: vec!["en".to_string(), "ja".to_string(), "x-default".to_string()],
        }
    }
}
