use crate::annotate::{AnnotatorError, Entity, EntityKind};
use chrono::NaiveDate;
use regex::Regex;

/// Recognizes date expressions in text and emits them as Date entities
///
/// Covered forms, in match priority order:
///
/// - Month-name dates: "March 15", "March 15, 2024", "15 March 2024"
/// - ISO dates: "2024-03-15" (calendar-validated)
/// - Bare years: "1999", "2024"
///
/// Overlapping matches are resolved in favor of the higher-priority form, so
/// the year inside "March 15, 2024" is not reported a second time.
pub struct DateRecognizer {
    month_day: Regex,
    day_month: Regex,
    iso: Regex,
    year: Regex,
}

const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|November|December";

impl DateRecognizer {
    /// Compiles the date patterns
    pub fn new() -> Result<Self, AnnotatorError> {
        let month_day = Regex::new(&format!(
            r"(?i)\b(?:{MONTHS})\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,\s*\d{{4}})?\b"
        ))?;
        let day_month = Regex::new(&format!(
            r"(?i)\b\d{{1,2}}\s+(?:{MONTHS})(?:\s+\d{{4}})?\b"
        ))?;
        let iso = Regex::new(r"\b\d{4}-\d{2}-\d{2}\b")?;
        let year = Regex::new(r"\b(?:19|20)\d{2}\b")?;

        Ok(Self {
            month_day,
            day_month,
            iso,
            year,
        })
    }

    /// Finds all date entities in `text`, in document order
    pub fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut spans: Vec<(usize, usize)> = Vec::new();
        let mut found: Vec<(usize, Entity)> = Vec::new();

        let mut accept = |start: usize, end: usize, matched: &str| {
            let overlaps = spans.iter().any(|&(s, e)| start < e && s < end);
            if !overlaps {
                spans.push((start, end));
                found.push((
                    start,
                    Entity {
                        text: matched.to_string(),
                        kind: EntityKind::Date,
                    },
                ));
            }
        };

        for m in self.month_day.find_iter(text) {
            accept(m.start(), m.end(), m.as_str());
        }
        for m in self.day_month.find_iter(text) {
            accept(m.start(), m.end(), m.as_str());
        }
        for m in self.iso.find_iter(text) {
            // Reject impossible calendar dates like 2024-13-45
            if NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").is_ok() {
                accept(m.start(), m.end(), m.as_str());
            }
        }
        for m in self.year.find_iter(text) {
            accept(m.start(), m.end(), m.as_str());
        }

        found.sort_by_key(|(start, _)| *start);
        found.into_iter().map(|(_, entity)| entity).collect()
    }
}
