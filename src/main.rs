//! Skimmer main entry point
//!
//! This is the command-line interface for the skimmer relevance-guided
//! crawler.

use anyhow::Context;
use clap::Parser;
use skimmer::config::load_config_with_hash;
use skimmer::crawler::crawl;
use skimmer::output::{print_report, write_markdown_summary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Skimmer: a relevance-guided web crawler
///
/// Skimmer expands outward from a set of seed pages, scores every page's
/// text against a configured search query, and keeps only pages relevant
/// enough to clear a threshold. Retained pages can then be filtered by a
/// substring lookup.
#[derive(Parser, Debug)]
#[command(name = "skimmer")]
#[command(version)]
#[command(about = "A relevance-guided web crawler", long_about = None)]
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

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// After the crawl, print only retained pages whose URL or text
    /// contains this substring (case-insensitive)
    #[arg(long, value_name = "SUBSTRING")]
    lookup: Option<String>,

    /// Maximum number of result rows to print
    #[arg(long, value_name = "N", default_value_t = 20)]
    top: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    // Run the crawl. Annotator or client construction failure is fatal;
    // everything after that is absorbed per-branch.
    let report = crawl(config.clone())
        .await
        .context("crawl failed to start")?;

    print_report(&report, cli.top);

    if let Some(path) = &config.output.summary_path {
        write_markdown_summary(&report, &config.search.query, std::path::Path::new(path))
            .with_context(|| format!("failed to write summary to {}", path))?;
        println!("\n✓ Summary exported to: {}", path);
    }

    if let Some(needle) = &cli.lookup {
        handle_lookup(&report.pages, needle, cli.top);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("skimmer=info,warn"),
            1 => EnvFilter::new("skimmer=debug,info"),
            2 => EnvFilter::new("skimmer=trace,debug"),
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
fn handle_dry_run(config: &skimmer::Config) {
    println!("=== Skimmer Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Score threshold: {}", config.crawler.score_threshold);
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nSearch:");
    println!("  Query: {}", config.search.query);

    println!("\nSeed URLs ({}):", config.search.seeds.len());
    for seed in &config.search.seeds {
        println!("  - {}", seed);
    }

    if let Some(path) = &config.output.summary_path {
        println!("\nOutput:");
        println!("  Summary: {}", path);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} seed URLs",
        config.search.seeds.len()
    );
}

/// Handles the --lookup mode: filters retained pages by substring
fn handle_lookup(pages: &[skimmer::PageRecord], needle: &str, top: usize) {
    let hits = skimmer::lookup(pages, needle);

    println!("\n=== Lookup: \"{}\" ===\n", needle);
    if hits.is_empty() {
        println!("No retained pages match.");
        return;
    }

    println!("{} of {} retained pages match:", hits.len(), pages.len());
    for hit in hits.iter().take(top) {
        println!("  {:.4}  {}", hit.score, hit.url);
    }
}
