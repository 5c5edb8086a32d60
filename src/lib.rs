//! Skimmer: a relevance-guided web crawler
//!
//! This crate implements a crawler that expands outward from a set of seed
//! pages, scores each page's text against a configured search query, and
//! retains only pages whose score clears a threshold. Retained pages form an
//! in-memory result index that can be queried by substring.

pub mod annotate;
pub mod config;
pub mod crawler;
pub mod index;
pub mod output;
pub mod score;
pub mod url;

use thiserror::Error;

/// Main error type for skimmer operations
#[derive(Debug, Error)]
pub enum SkimmerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Text annotator unavailable: {0}")]
    Annotator(#[from] annotate::AnnotatorError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for skimmer operations
pub type Result<T> = std::result::Result<T, SkimmerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlReport};
pub use index::{lookup, CrawlIndex, PageRecord};
pub use url::normalize_url;
