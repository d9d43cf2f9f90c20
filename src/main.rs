//! Spider-Recon main entry point
//!
//! This is the command-line interface for the Spider-Recon product
//! discovery crawler.

use anyhow::Context;
use clap::Parser;
use spider_recon::config::load_config_with_hash;
use spider_recon::crawler::crawl;
use spider_recon::output::{print_summary, write_results};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Spider-Recon: product discovery for e-commerce category pages
///
/// Spider-Recon renders category listing pages in a headless browser,
/// extracts candidate links, classifies them with URL/DOM heuristics, and
/// resolves ambiguous links through an LLM. Results are written as a JSON
/// mapping from category URL to product URLs.
#[derive(Parser, Debug)]
#[command(name = "spider-recon")]
#[command(version = "1.0.0")]
#[command(about = "Product discovery for e-commerce category pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("spider_recon=info,warn"),
            1 => EnvFilter::new("spider_recon=debug,info"),
            2 => EnvFilter::new("spider_recon=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &spider_recon::config::Config) {
    println!("=== Spider-Recon Dry Run ===\n");

    println!("Renderer:");
    println!("  Scroll passes: {}", config.renderer.scroll_count);
    println!("  Scroll wait: {}ms", config.renderer.scroll_wait_ms);
    println!("  Page timeout: {}ms", config.renderer.page_timeout_ms);
    println!("  Browser sessions: {}", config.renderer.max_sessions);

    println!("\nClassifier:");
    println!("  API base URL: {}", config.classifier.api_base_url);
    println!("  Model: {}", config.classifier.model);
    println!("  Batch size: {}", config.classifier.batch_size);

    println!("\nOutput:");
    println!("  Results: {}", config.output.results_path);

    println!("\nCategories ({}):", config.categories.len());
    for entry in &config.categories {
        println!("  - {}", entry.url);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} category page(s)", config.categories.len());
}

/// Handles the main crawl operation
async fn handle_crawl(config: spider_recon::config::Config) -> anyhow::Result<()> {
    tracing::info!("Starting crawl of {} category page(s)", config.categories.len());

    let results_path = PathBuf::from(&config.output.results_path);

    let result = crawl(config).await.context("crawl failed")?;

    write_results(&result, &results_path)
        .with_context(|| format!("failed to write results to {}", results_path.display()))?;

    print_summary(&result);

    Ok(())
}
