//! Relevance scoring module
//!
//! A page's score measures how well its extracted text aligns with the
//! configured search query. Scoring is deterministic: the same text and
//! query always produce the same score, with no I/O and no shared state.

use crate::annotate::{Annotation, EntityKind, TextAnnotator};
use std::sync::Arc;

/// Tokens that boost a page's score regardless of the query
///
/// These mark recency-oriented language, which the relevance heuristic
/// favors.
pub const BOOST_TERMS: &[&str] = &["today", "latest"];

/// Score contribution for a token appearing in the query
const QUERY_MATCH_WEIGHT: f64 = 1.0;

/// Score contribution for a boost-vocabulary token or a date entity
const BOOST_WEIGHT: f64 = 0.5;

/// Computes a relevance score for an annotation against a query
///
/// The score is the sum of:
///
/// - 1.0 per token whose lowercase form appears as a substring of the
///   lowercased query. The match is against the *entire* query string, not
///   per query word: for a query like "gaza palestine israel" any token
///   that is a substring of that whole string scores. This is a crude
///   keyword heuristic, kept intentionally.
/// - 0.5 per token equal to "today" or "latest"
/// - 0.5 per named entity of the Date category
///
/// normalized by the token count. An empty query or an annotation with no
/// tokens scores 0.0.
pub fn score_annotation(annotation: &Annotation, query: &str) -> f64 {
    if annotation.tokens.is_empty() || query.is_empty() {
        return 0.0;
    }

    let query_lower = query.to_lowercase();
    let mut total = 0.0;

    for token in &annotation.tokens {
        let lower = token.to_lowercase();
        if query_lower.contains(&lower) {
            total += QUERY_MATCH_WEIGHT;
        }
        if BOOST_TERMS.contains(&lower.as_str()) {
            total += BOOST_WEIGHT;
        }
    }

    for entity in &annotation.entities {
        if entity.kind == EntityKind::Date {
            total += BOOST_WEIGHT;
        }
    }

    total / annotation.tokens.len() as f64
}

/// Scores page text against a query using a text annotator
///
/// Owns a shared handle to the annotator so it can be cloned into every
/// concurrent traversal branch.
#[derive(Clone)]
pub struct Scorer {
    annotator: Arc<dyn TextAnnotator>,
}

impl Scorer {
    /// Creates a scorer over the given annotator
    pub fn new(annotator: Arc<dyn TextAnnotator>) -> Self {
        Self { annotator }
    }

    /// Scores `text` against `query`
    ///
    /// Fails softly: empty text or an empty query scores 0.0 rather than
    /// raising an error.
    pub fn score(&self, text: &str, query: &str) -> f64 {
        if text.is_empty() || query.is_empty() {
            return 0.0;
        }

        let annotation = self.annotator.annotate(text);
        score_annotation(&annotation, query)
    }
}
