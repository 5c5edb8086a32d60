use crate::annotate::AnnotatorError;
use regex::Regex;

/// Splits text into tokens: word runs or single punctuation marks
///
/// Punctuation counts as a token so that score normalization divides by the
/// same token count a linguistic tokenizer would produce for prose.
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    /// Compiles the token pattern
    pub fn new() -> Result<Self, AnnotatorError> {
        let pattern = Regex::new(r"\w+|[^\w\s]")?;
        Ok(Self { pattern })
    }

    /// Tokenizes `text`, preserving document order
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
