//! Time of day, stored as written.

use super::patterns::TIME_PATTERN;
use super::{first_match, whole, FieldExtractor, FieldMatch, FieldTable, Rule};
use crate::models::record::Field;

/// Invoice time extractor. No timezone conversion is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeExtractor;

impl TimeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for TimeExtractor {
    fn field(&self) -> Field {
        Field::InvoiceTime
    }

    fn extract(&self, text: &str, _prior: &FieldTable) -> FieldMatch {
        let rules = [Rule {
            name: "clock time",
            pattern: &TIME_PATTERN,
            transform: whole,
        }];

        first_match(&rules, text)
            .map(|m| FieldMatch::found(m.value))
            .unwrap_or_default()
    }
}
