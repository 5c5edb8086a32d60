//! Traversal engine - the concurrent fetch/score/expand loop
//!
//! Each in-flight traversal task owns one (url, depth) pair and walks a
//! fixed state machine:
//!
//! 1. Depth gate: past the maximum depth the task is a pure no-op
//! 2. Fetch: a failure terminates this branch only, silently
//! 3. Extract: plain text and outbound links via the HTML parser
//! 4. Score: relevance of the text against the configured query
//! 5. Threshold gate: pages at or below the threshold are discarded and
//!    their links are NOT expanded - low-relevance pages prune the tree
//! 6. Record and expand: the page enters the index, and every link that
//!    wins a visited-set claim is spawned as a child task at depth + 1
//!
//! A branch completes only after all of its children complete, giving a
//! tree of tasks rooted at each seed. Concurrent fetch volume is bounded by
//! a global semaphore; branches never hold a permit while joining children,
//! so the pool cannot deadlock on its own subtree.

use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::parse_html;
use crate::index::CrawlIndex;
use crate::output::CrawlStats;
use crate::score::Scorer;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use url::Url;

/// Cooperative cancellation flag shared by every traversal branch
///
/// Once set, branches terminate at their next task entry without side
/// effects; fetches already in flight are allowed to finish.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of the crawl
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The shared context driving a crawl run
///
/// One instance is built per run and shared by every spawned task.
pub struct Traversal {
    query: String,
    max_depth: u32,
    score_threshold: f64,
    fetcher: Arc<dyn PageFetcher>,
    scorer: Scorer,
    index: Arc<CrawlIndex>,
    stats: Arc<CrawlStats>,
    permits: Arc<Semaphore>,
    cancel: CancelFlag,
}

impl Traversal {
    /// Creates the traversal context for a crawl run
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn PageFetcher>,
        scorer: Scorer,
        index: Arc<CrawlIndex>,
        stats: Arc<CrawlStats>,
        cancel: CancelFlag,
    ) -> Self {
        Self {
            query: config.search.query.clone(),
            max_depth: config.crawler.max_depth,
            score_threshold: config.crawler.score_threshold,
            permits: Arc::new(Semaphore::new(
                config.crawler.max_concurrent_fetches as usize,
            )),
            fetcher,
            scorer,
            index,
            stats,
            cancel,
        }
    }

    /// Spawns the traversal task for `(url, depth)`
    ///
    /// The caller must have claimed `url` in the index first; this is what
    /// guarantees at-most-once fetching.
    pub fn spawn_visit(self: Arc<Self>, url: Url, depth: u32) -> JoinHandle<()> {
        tokio::spawn(self.visit(url, depth))
    }

    /// One full pass of the per-page state machine
    ///
    /// Boxed because the traversal is recursive through spawned children.
    fn visit(self: Arc<Self>, url: Url, depth: u32) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(async move {
            if self.cancel.is_cancelled() {
                return;
            }

            if depth > self.max_depth {
                self.stats.record_depth_pruned();
                return;
            }

            let body = {
                // Permit scope covers the fetch only
                let _permit = match self.permits.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };

                match self.fetcher.fetch(&url).await {
                    Ok(body) => {
                        self.stats.record_fetched();
                        body
                    }
                    Err(e) => {
                        tracing::debug!("Skipping {}: {}", url, e);
                        self.stats.record_fetch_failure();
                        return;
                    }
                }
            };

            let parsed = parse_html(&body, &url);
            let score = self.scorer.score(&parsed.text, &self.query);

            if score <= self.score_threshold {
                tracing::debug!("Below threshold ({:.4}): {}", score, url);
                self.stats.record_below_threshold();
                return;
            }

            tracing::info!("Score: {:.2} - {}", score, url);
            self.index.record(url.as_str(), score, parsed.text);
            self.stats.record_retained();

            let mut children = Vec::new();
            for link in parsed.links {
                self.stats.record_link_discovered();
                if self.index.try_claim(link.as_str()) {
                    children.push(Arc::clone(&self).spawn_visit(link, depth + 1));
                } else {
                    self.stats.record_duplicate_skipped();
                }
            }

            // Structured join: this branch completes only once its subtree has
            for child in children {
                if let Err(e) = child.await {
                    tracing::warn!("Traversal task for a child of {} failed: {}", url, e);
                }
            }
        })
    }
}
