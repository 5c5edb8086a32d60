//! Crawl result reporting
//!
//! Renders a finished [`CrawlReport`] for humans: a ranked console listing
//! and an optional markdown summary file.

use crate::crawler::CrawlReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prints a ranked result listing and the run counters to stdout
///
/// # Arguments
///
/// * `report` - The finished crawl report
/// * `top` - Maximum number of result rows to print
pub fn print_report(report: &CrawlReport, top: usize) {
    println!("=== Crawl Results ===\n");

    if report.pages.is_empty() {
        println!("No pages cleared the score threshold.");
    } else {
        println!(
            "Top {} of {} retained pages:",
            top.min(report.pages.len()),
            report.pages.len()
        );
        for (rank, page) in report.pages.iter().take(top).enumerate() {
            println!("  {:>3}. {:.4}  {}", rank + 1, page.score, page.url);
        }
    }
    println!();

    let stats = &report.stats;
    println!("Statistics:");
    println!("  Pages fetched: {}", stats.pages_fetched);
    println!("  Fetch failures: {}", stats.fetch_failures);
    println!("  Below threshold: {}", stats.below_threshold);
    println!("  Depth pruned: {}", stats.depth_pruned);
    println!("  Links discovered: {}", stats.links_discovered);
    println!("  Duplicates skipped: {}", stats.duplicates_skipped);

    let attempted = stats.pages_fetched + stats.fetch_failures;
    let retention_rate = if attempted > 0 {
        (stats.retained as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "\nRetention Rate: {:.1}% ({} / {} fetch attempts retained)",
        retention_rate, stats.retained, attempted
    );
}

/// Writes a markdown summary of the crawl results
///
/// # Arguments
///
/// * `report` - The finished crawl report
/// * `query` - The relevance query the crawl was scored against
/// * `output_path` - Path where the markdown file should be written
pub fn write_markdown_summary(
    report: &CrawlReport,
    query: &str,
    output_path: &Path,
) -> std::io::Result<()> {
    let markdown = format_markdown_summary(report, query);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_summary(report: &CrawlReport, query: &str) -> String {
    let mut md = String::new();

    md.push_str("# Skimmer Crawl Results\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n",
        chrono::Utc::now().to_rfc3339()
    ));
    md.push_str(&format!("- **Query**: {}\n", query));
    md.push_str(&format!("- **Retained Pages**: {}\n\n", report.pages.len()));

    md.push_str("## Statistics\n\n");
    md.push_str("| Counter | Value |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!(
        "| Pages fetched | {} |\n",
        report.stats.pages_fetched
    ));
    md.push_str(&format!(
        "| Fetch failures | {} |\n",
        report.stats.fetch_failures
    ));
    md.push_str(&format!(
        "| Below threshold | {} |\n",
        report.stats.below_threshold
    ));
    md.push_str(&format!(
        "| Depth pruned | {} |\n",
        report.stats.depth_pruned
    ));
    md.push_str(&format!(
        "| Links discovered | {} |\n",
        report.stats.links_discovered
    ));
    md.push_str(&format!(
        "| Duplicates skipped | {} |\n\n",
        report.stats.duplicates_skipped
    ));

    md.push_str("## Results\n\n");
    if report.pages.is_empty() {
        md.push_str("_No pages cleared the score threshold._\n");
    } else {
        md.push_str("| Rank | Score | URL |\n");
        md.push_str("|------|-------|-----|\n");
        for (rank, page) in report.pages.iter().enumerate() {
            md.push_str(&format!(
                "| {} | {:.4} | {} |\n",
                rank + 1,
                page.score,
                page.url
            ));
        }
    }

    md
}
