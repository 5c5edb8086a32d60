//! Aggregate crawl counters
//!
//! Per-page failures never escalate past their branch, so these counters
//! are the only crawl-wide view of what happened. Every traversal branch
//! increments them concurrently; a snapshot is taken once the run ends.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters shared across all traversal branches
#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_fetched: AtomicU64,
    fetch_failures: AtomicU64,
    depth_pruned: AtomicU64,
    below_threshold: AtomicU64,
    retained: AtomicU64,
    links_discovered: AtomicU64,
    duplicates_skipped: AtomicU64,
}

impl CrawlStats {
    /// Creates zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_depth_pruned(&self) {
        self.depth_pruned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_below_threshold(&self) {
        self.below_threshold.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retained(&self) {
        self.retained.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_link_discovered(&self) {
        self.links_discovered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate_skipped(&self) {
        self.duplicates_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of all counters
    pub fn snapshot(&self) -> StatsSummary {
        StatsSummary {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            depth_pruned: self.depth_pruned.load(Ordering::Relaxed),
            below_threshold: self.below_threshold.load(Ordering::Relaxed),
            retained: self.retained.load(Ordering::Relaxed),
            links_discovered: self.links_discovered.load(Ordering::Relaxed),
            duplicates_skipped: self.duplicates_skipped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the crawl counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSummary {
    /// Pages fetched successfully
    pub pages_fetched: u64,

    /// Fetch attempts that failed (status, transport, or decode)
    pub fetch_failures: u64,

    /// Tasks that terminated at the depth gate
    pub depth_pruned: u64,

    /// Fetched pages discarded at the threshold gate
    pub below_threshold: u64,

    /// Pages recorded in the result index
    pub retained: u64,

    /// Outbound links seen on retained pages
    pub links_discovered: u64,

    /// Links skipped because another branch already claimed them
    pub duplicates_skipped: u64,
}
