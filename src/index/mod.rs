//! Crawl index: the shared visited-set, frontier record, and result index
//!
//! A single URL-keyed map serves three roles at once: it is the
//! deduplication record that keeps branches from re-fetching pages, the
//! destination for retained page scores, and the index the lookup surface
//! reads. It grows monotonically during a crawl run and is only read
//! afterwards.
//!
//! Concurrency discipline: claiming is an atomic check-and-mark
//! ([`CrawlIndex::try_claim`]). Two branches racing to discover the same URL
//! cannot both fetch it; exactly one claim succeeds crawl-wide. A claimed
//! URL stays in the map even if its branch later fails or is gated out, so
//! it is never revisited.

mod lookup;

pub use lookup::lookup;

use std::collections::HashMap;
use std::sync::Mutex;

/// A retained page: its address, relevance score, and extracted text
///
/// The text is stored so substring lookups can be answered without
/// re-fetching anything.
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub url: String,
    pub score: f64,
    pub text: String,
}

/// Internal per-URL entry
#[derive(Debug)]
enum PageEntry {
    /// Claimed by a traversal branch; not (or not yet) retained
    Claimed,

    /// Passed the threshold gate and was recorded
    Retained { score: f64, text: String, seq: u64 },
}

#[derive(Debug, Default)]
struct Inner {
    pages: HashMap<String, PageEntry>,
    next_seq: u64,
}

/// Shared URL -> score mapping, doubling as the visited set
///
/// All traversal branches hold the same index behind an `Arc` and may call
/// any method concurrently.
#[derive(Debug, Default)]
pub struct CrawlIndex {
    inner: Mutex<Inner>,
}

impl CrawlIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true iff `url` has not been seen by any branch
    pub fn should_visit(&self, url: &str) -> bool {
        let inner = self.inner.lock().expect("index lock poisoned");
        !inner.pages.contains_key(url)
    }

    /// Atomically claims `url` for fetching
    ///
    /// Returns true if the caller won the claim and should fetch the page;
    /// false if any branch already claimed it.
    pub fn try_claim(&self, url: &str) -> bool {
        let mut inner = self.inner.lock().expect("index lock poisoned");
        if inner.pages.contains_key(url) {
            false
        } else {
            inner.pages.insert(url.to_string(), PageEntry::Claimed);
            true
        }
    }

    /// Records a retained page's score and text
    ///
    /// Inserts or overwrites; called only after a successful fetch whose
    /// score cleared the threshold.
    pub fn record(&self, url: &str, score: f64, text: String) {
        let mut inner = self.inner.lock().expect("index lock poisoned");
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner
            .pages
            .insert(url.to_string(), PageEntry::Retained { score, text, seq });
    }

    /// Number of retained pages
    pub fn retained_count(&self) -> usize {
        let inner = self.inner.lock().expect("index lock poisoned");
        inner
            .pages
            .values()
            .filter(|entry| matches!(entry, PageEntry::Retained { .. }))
            .count()
    }

    /// Returns all retained pages sorted by score descending, ties broken
    /// by insertion order
    pub fn snapshot_ordered(&self) -> Vec<PageRecord> {
        let inner = self.inner.lock().expect("index lock poisoned");

        let mut entries: Vec<(&String, f64, &String, u64)> = inner
            .pages
            .iter()
            .filter_map(|(url, entry)| match entry {
                PageEntry::Retained { score, text, seq } => Some((url, *score, text, *seq)),
                PageEntry::Claimed => None,
            })
            .collect();

        entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.3.cmp(&b.3))
        });

        entries
            .into_iter()
            .map(|(url, score, text, _)| PageRecord {
                url: url.clone(),
                score,
                text: text.clone(),
            })
            .collect()
    }
}
