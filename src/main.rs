//! Sitemap-Audit main entry point
//!
//! This is the command-line interface for the Sitemap-Audit SEO crawler.

use anyhow::Context;
use clap::Parser;
use sitemap_audit::config::{resolve_config, Config, ConfigOverrides};
use sitemap_audit::crawler::{run_audit, Coordinator};
use sitemap_audit::output::{generate_reports, load_statistics, print_statistics};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Sitemap-Audit: a sequential sitemap SEO auditor
///
/// Sitemap-Audit resolves a sitemap into page URLs, respects robots.txt,
/// and audits each page for titles, headings, structured data, hreflang
/// and asset sizes. Results can then be analyzed into an issue report.
#[derive(Parser, Debug)]
#[command(name = "sitemap-audit")]
#[command(version = "1.0.0")]
#[command(about = "A sequential sitemap SEO auditor", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Sitemap or sitemap index URL to start from
    #[arg(long, env = "CRAWL_START_URL", value_name = "URL")]
    start_url: Option<String>,

    /// Maximum number of URLs to audit
    #[arg(long, env = "CRAWL_MAX_URLS", value_name = "N")]
    max_urls: Option<usize>,

    /// Results file to write (or read with --analyze / --stats)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Resolve robots.txt and the sitemap, print the plan, and exit
    #[arg(long, conflicts_with_all = ["analyze", "stats"])]
    dry_run: bool,

    /// Analyze an existing results file into issues.csv and summary.md
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    analyze: bool,

    /// Show statistics from an existing results file and exit
    #[arg(long, conflicts_with_all = ["dry_run", "analyze"])]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let overrides = ConfigOverrides {
        start_url: cli.start_url.clone(),
        max_urls: cli.max_urls,
        results_path: cli.output.clone(),
    };

    let (config, config_hash) =
        resolve_config(cli.config.as_deref(), overrides).context("Failed to load configuration")?;
    match (&cli.config, config_hash) {
        (Some(path), Some(hash)) => {
            tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash)
        }
        _ => tracing::debug!("No configuration file given, using defaults"),
    }

    if cli.dry_run {
        handle_dry_run(config).await?;
    } else if cli.analyze {
        handle_analyze(&config)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_audit(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_audit=info,warn"),
            1 => EnvFilter::new("sitemap_audit=debug,info"),
            2 => EnvFilter::new("sitemap_audit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows which URLs would be audited
async fn handle_dry_run(config: Config) -> anyhow::Result<()> {
    println!("=== Sitemap-Audit Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Start URL: {}", config.crawl.start_url);
    println!("  Max URLs: {}", config.crawl.max_urls);
    println!("  Request delay: {}ms", config.crawl.request_delay_ms);
    println!("  Checkpoint every: {} pages", config.crawl.checkpoint_every);
    println!("  Request timeout: {}s", config.crawl.request_timeout_secs);

    println!("\nAsset Limits:");
    println!("  CSS: {}", config.limits.max_css);
    println!("  JS: {}", config.limits.max_js);
    println!("  Fonts: {}", config.limits.max_fonts);
    println!("  Images probed: {}", config.limits.max_images_probed);

    println!("\nOutput:");
    println!("  Results: {}", config.output.results_path);

    let coordinator = Coordinator::new(config)?;
    let plan = coordinator.plan().await?;

    println!(
        "\nrobots.txt: {} allow, {} disallow rules",
        plan.rules.allow.len(),
        plan.rules.disallow.len()
    );
    println!(
        "Sitemap: {} URLs discovered, {} disallowed",
        plan.discovered.len(),
        plan.disallowed_count()
    );

    println!("\nURLs to audit ({}):", plan.allowed.len());
    for url in &plan.allowed {
        println!("  - {}", url);
    }

    println!("\n✓ Dry run complete");
    Ok(())
}

/// Handles the --analyze mode: writes the issue report and summary
fn handle_analyze(config: &Config) -> anyhow::Result<()> {
    let issues = generate_reports(config).with_context(|| {
        format!(
            "Failed to analyze results from {}",
            config.output.results_path
        )
    })?;
    println!("Found {} issues", issues.len());
    println!("  Issues: {}", config.output.issues_path);
    println!("  Summary: {}", config.output.summary_path);
    Ok(())
}

/// Handles the --stats mode: prints statistics from a results file
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let path = Path::new(&config.output.results_path);
    let stats = load_statistics(path)
        .with_context(|| format!("Failed to read results from {}", path.display()))?;
    print_statistics(&stats);
    Ok(())
}

/// Handles the default mode: runs the audit
async fn handle_audit(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting audit of {} (max {} URLs)",
        config.crawl.start_url,
        config.crawl.max_urls
    );

    run_audit(config).await.context("Audit failed")?;
    Ok(())
}
