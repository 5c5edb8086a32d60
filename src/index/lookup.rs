use crate::index::PageRecord;

/// Finds retained pages matching a substring query
///
/// A record matches when its URL or its extracted text contains `needle`,
/// case-insensitively. The input slice is expected to come from
/// [`CrawlIndex::snapshot_ordered`](crate::index::CrawlIndex::snapshot_ordered),
/// so matches keep the score-descending order. Lookups are answered entirely
/// from recorded data; no page is ever re-fetched.
///
/// An empty needle matches every record.
pub fn lookup<'a>(records: &'a [PageRecord], needle: &str) -> Vec<&'a PageRecord> {
    let needle_lower = needle.to_lowercase();

    records
        .iter()
        .filter(|record| {
            record.url.to_lowercase().contains(&needle_lower)
                || record.text.to_lowercase().contains(&needle_lower)
        })
        .collect()
}
