//! Crawler module for relevance-guided page traversal
//!
//! This module contains the core crawling logic:
//! - The [`PageFetcher`] capability and its reqwest-backed implementation
//! - HTML parsing into scoreable text and outbound links
//! - The concurrent traversal engine with its depth and threshold gates
//! - The top-level [`crawl`] entry point

mod fetcher;
mod parser;
mod traversal;

pub use fetcher::{build_http_client, FetchError, HttpFetcher, PageFetcher};
pub use parser::{parse_html, ParsedPage};
pub use traversal::{CancelFlag, Traversal};

use crate::annotate::{RegexAnnotator, TextAnnotator};
use crate::config::Config;
use crate::index::{CrawlIndex, PageRecord};
use crate::output::{CrawlStats, StatsSummary};
use crate::score::Scorer;
use crate::url::normalize_url;
use crate::SkimmerError;
use std::sync::Arc;

/// The outcome of a completed crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Retained pages, sorted by score descending
    pub pages: Vec<PageRecord>,

    /// Aggregate counters for the whole run
    pub stats: StatsSummary,
}

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Construct the text annotator (failure here is fatal - scoring is
///    undefined without it)
/// 2. Build the HTTP client
/// 3. Install a Ctrl-C handler that cancels the run cooperatively
/// 4. Spawn a traversal task per seed at depth 0 and wait for every seed's
///    subtree to finish
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Retained pages and run statistics
/// * `Err(SkimmerError)` - Startup failed before any traversal began
pub async fn crawl(config: Config) -> Result<CrawlReport, SkimmerError> {
    let annotator: Arc<dyn TextAnnotator> = Arc::new(RegexAnnotator::new()?);
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(&config.crawler.user_agent)?);

    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown requested; in-flight fetches will finish");
                cancel.cancel();
            }
        });
    }

    Ok(run_crawl(&config, fetcher, annotator, cancel).await)
}

/// Runs a crawl with explicitly provided collaborators
///
/// Once the collaborators exist, nothing can fail crawl-wide anymore: every
/// per-page failure is absorbed by its own branch, so this always produces
/// a report.
pub async fn run_crawl(
    config: &Config,
    fetcher: Arc<dyn PageFetcher>,
    annotator: Arc<dyn TextAnnotator>,
    cancel: CancelFlag,
) -> CrawlReport {
    let index = Arc::new(CrawlIndex::new());
    let stats = Arc::new(CrawlStats::new());
    let scorer = Scorer::new(annotator);

    let engine = Arc::new(Traversal::new(
        config,
        fetcher,
        scorer,
        Arc::clone(&index),
        Arc::clone(&stats),
        cancel,
    ));

    let mut roots = Vec::new();
    for seed in &config.search.seeds {
        let url = match normalize_url(seed) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping seed '{}': {}", seed, e);
                continue;
            }
        };

        // Duplicate seeds collapse into one traversal
        if index.try_claim(url.as_str()) {
            roots.push(Arc::clone(&engine).spawn_visit(url, 0));
        }
    }

    for root in roots {
        if let Err(e) = root.await {
            tracing::warn!("Seed traversal task failed: {}", e);
        }
    }

    let report = CrawlReport {
        pages: index.snapshot_ordered(),
        stats: stats.snapshot(),
    };

    tracing::info!(
        "Crawl complete: {} retained, {} fetched, {} failed",
        report.stats.retained,
        report.stats.pages_fetched,
        report.stats.fetch_failures
    );

    report
}
