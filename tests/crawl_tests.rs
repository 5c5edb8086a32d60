//! Integration tests for the crawler
//!
//! These tests use wiremock to stand up mock HTTP servers and exercise the
//! full fetch -> parse -> score -> expand cycle end-to-end with the real
//! HTTP fetcher.

use skimmer::annotate::RegexAnnotator;
use skimmer::config::{Config, CrawlerConfig, OutputConfig, SearchConfig};
use skimmer::crawler::{run_crawl, CancelFlag, CrawlReport, HttpFetcher};
use skimmer::lookup;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for the given seeds
fn create_test_config(query: &str, seeds: Vec<String>, max_depth: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_depth,
            max_concurrent_fetches: 5,
            score_threshold: 0.0,
            user_agent: "skimmer-test/1.0".to_string(),
        },
        search: SearchConfig {
            query: query.to_string(),
            seeds,
        },
        output: OutputConfig::default(),
    }
}

/// Runs a crawl against the given config with the real HTTP fetcher
async fn run(config: &Config) -> CrawlReport {
    let fetcher = Arc::new(HttpFetcher::new(&config.crawler.user_agent).expect("client"));
    let annotator = Arc::new(RegexAnnotator::new().expect("annotator"));
    run_crawl(config, fetcher, annotator, CancelFlag::new()).await
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

#[tokio::test]
async fn test_full_crawl_retains_relevant_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<h1>Ceasefire talks resume</h1>
               <p>Negotiators returned to Cairo today.</p>
               <a href="/page1">follow-up</a>
               <a href="/page2">markets</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html_page(
            r#"<p>The ceasefire held through the night.</p>"#,
        ))
        .mount(&mock_server)
        .await;

    // No query token, no boost word, no date: scores 0.0 and is gated out
    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html_page(r#"<p>Quarterly earnings rose.</p>"#))
        .mount(&mock_server)
        .await;

    let config = create_test_config("ceasefire", vec![format!("{}/", base_url)], 2);
    let report = run(&config).await;

    let urls: Vec<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
    assert!(urls.contains(&format!("{}/", base_url).as_str()));
    assert!(urls.contains(&format!("{}/page1", base_url).as_str()));
    assert!(!urls.contains(&format!("{}/page2", base_url).as_str()));

    assert_eq!(report.stats.pages_fetched, 3);
    assert_eq!(report.stats.retained, 2);
    assert_eq!(report.stats.below_threshold, 1);
}

#[tokio::test]
async fn test_gated_page_links_are_not_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<p>Ceasefire monitoring continues.</p><a href="/dull">dull</a>"#,
        ))
        .mount(&mock_server)
        .await;

    // Irrelevant page linking onward; its link must never be fetched
    Mock::given(method("GET"))
        .and(path("/dull"))
        .respond_with(html_page(
            r#"<p>Quarterly earnings rose.</p><a href="/hidden">hidden</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hidden"))
        .respond_with(html_page(r#"<p>Ceasefire details.</p>"#))
        .expect(0) // Pruned: its referrer was gated out
        .mount(&mock_server)
        .await;

    let config = create_test_config("ceasefire", vec![format!("{}/", base_url)], 3);
    let report = run(&config).await;

    assert_eq!(report.stats.retained, 1);
    assert_eq!(report.stats.below_threshold, 1);
    // Wiremock verifies the expect(0) when the server drops
}

#[tokio::test]
async fn test_crawl_with_depth_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Chain: / -> /level1 -> /level2 -> /level3, all relevant
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<p>Ceasefire root.</p><a href="/level1">next</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level1"))
        .respond_with(html_page(
            r#"<p>Ceasefire level one.</p><a href="/level2">next</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level2"))
        .respond_with(html_page(
            r#"<p>Ceasefire level two.</p><a href="/level3">next</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level3"))
        .respond_with(html_page(r#"<p>Ceasefire level three.</p>"#))
        .expect(0) // Sits at depth 3 with max_depth 2
        .mount(&mock_server)
        .await;

    let config = create_test_config("ceasefire", vec![format!("{}/", base_url)], 2);
    let report = run(&config).await;

    assert_eq!(report.stats.pages_fetched, 3);
    assert_eq!(report.stats.depth_pruned, 1);
    assert_eq!(report.pages.len(), 3);
}

#[tokio::test]
async fn test_fetch_failures_are_absorbed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<p>Ceasefire overview.</p>
               <a href="/gone">gone</a>
               <a href="/alive">alive</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/alive"))
        .respond_with(html_page(r#"<p>Ceasefire appendix.</p>"#))
        .mount(&mock_server)
        .await;

    let config = create_test_config("ceasefire", vec![format!("{}/", base_url)], 2);
    let report = run(&config).await;

    // The 404 terminated only its own branch
    assert_eq!(report.stats.fetch_failures, 1);
    assert_eq!(report.stats.retained, 2);
    let urls: Vec<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
    assert!(urls.contains(&format!("{}/alive", base_url).as_str()));
}

#[tokio::test]
async fn test_shared_link_fetched_exactly_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Both branches link to /shared; the claim-based visited set allows
    // only one fetch
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<p>Ceasefire hub.</p>
               <a href="/left">left</a>
               <a href="/right">right</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/left"))
        .respond_with(html_page(
            r#"<p>Ceasefire west.</p><a href="/shared">shared</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/right"))
        .respond_with(html_page(
            r#"<p>Ceasefire east.</p><a href="/shared">shared</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(html_page(r#"<p>Ceasefire shared annex.</p>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config("ceasefire", vec![format!("{}/", base_url)], 3);
    let report = run(&config).await;

    assert_eq!(report.stats.duplicates_skipped, 1);
    assert_eq!(report.stats.retained, 4);
}

#[tokio::test]
async fn test_cyclic_links_terminate() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<p>Ceasefire alpha.</p><a href="/back">loop</a>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/back"))
        .respond_with(html_page(
            r#"<p>Ceasefire beta.</p><a href="/">home</a>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config("ceasefire", vec![format!("{}/", base_url)], 3);
    let report = run(&config).await;

    assert_eq!(report.pages.len(), 2);
}

#[tokio::test]
async fn test_lookup_serves_from_recorded_data() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<p>Ceasefire negotiators met in Cairo.</p><a href="/other">other</a>"#,
        ))
        .expect(1) // Lookup must not re-fetch
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/other"))
        .respond_with(html_page(r#"<p>Ceasefire timetable published.</p>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config("ceasefire", vec![format!("{}/", base_url)], 1);
    let report = run(&config).await;

    // Matches on extracted text
    let hits = lookup(&report.pages, "cairo");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].url, format!("{}/", base_url));

    // Matches on URL
    let hits = lookup(&report.pages, "other");
    assert_eq!(hits.len(), 1);

    // No match
    assert!(lookup(&report.pages, "snowfall").is_empty());
}
