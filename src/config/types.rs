use serde::Deserialize;

/// Main configuration structure for skimmer
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum depth to crawl from seed URLs
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Minimum relevance score a page must exceed to be retained
    #[serde(rename = "score-threshold")]
    pub score_threshold: f64,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Search configuration: what to look for and where to start
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// The search query pages are scored against
    pub query: String,

    /// Seed URLs that start the crawl at depth 0
    pub seeds: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Optional path for a markdown summary of the results
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

fn default_user_agent() -> String {
    format!("skimmer/{}", env!("CARGO_PKG_VERSION"))
}
