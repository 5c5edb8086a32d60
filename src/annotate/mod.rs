//! Text annotation module for skimmer
//!
//! Scoring needs two views of a page's text: its tokens and its named
//! entities. This module defines the [`TextAnnotator`] capability that
//! produces both, plus the default [`RegexAnnotator`] implementation built
//! on pattern matching.
//!
//! Annotator construction is fallible and must happen before the crawl
//! starts: scoring is undefined without an annotator, so a construction
//! failure is fatal to the whole process rather than a per-page condition.

mod dates;
mod tokenizer;

pub use dates::DateRecognizer;
pub use tokenizer::Tokenizer;

use thiserror::Error;

/// Errors raised while constructing an annotator
#[derive(Debug, Error)]
pub enum AnnotatorError {
    #[error("failed to compile annotation pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Category label attached to a recognized named entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A calendar date, bare year, or month-day expression
    Date,
}

/// A named entity found in annotated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// The matched text
    pub text: String,

    /// The entity's category
    pub kind: EntityKind,
}

/// The result of annotating a piece of text
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    /// Tokens in document order
    pub tokens: Vec<String>,

    /// Named entities in document order
    pub entities: Vec<Entity>,
}

/// Capability that turns raw text into tokens and named entities
pub trait TextAnnotator: Send + Sync {
    /// Annotates `text`, returning its tokens and named entities
    fn annotate(&self, text: &str) -> Annotation;
}

/// Default annotator backed by compiled regular expressions
///
/// Tokenization splits text into word runs and single punctuation marks;
/// entity recognition currently covers the Date category only.
pub struct RegexAnnotator {
    tokenizer: Tokenizer,
    dates: DateRecognizer,
}

impl RegexAnnotator {
    /// Compiles the annotation patterns
    ///
    /// # Returns
    ///
    /// * `Ok(RegexAnnotator)` - Ready-to-use annotator
    /// * `Err(AnnotatorError)` - A pattern failed to compile
    pub fn new() -> Result<Self, AnnotatorError> {
        Ok(Self {
            tokenizer: Tokenizer::new()?,
            dates: DateRecognizer::new()?,
        })
    }
}

impl TextAnnotator for RegexAnnotator {
    fn annotate(&self, text: &str) -> Annotation {
        Annotation {
            tokens: self.tokenizer.tokenize(text),
            entities: self.dates.recognize(text),
        }
    }
}
