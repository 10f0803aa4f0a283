//! Rule-based field extractors for invoices and receipts.
//!
//! Every scalar field is extracted by an ordered rule list: rules are tried
//! from most specific to most generic and the first rule producing a value
//! wins. There is no scoring and no backtracking across extractors.

pub mod amounts;
pub mod dates;
pub mod doc_type;
pub mod labels;
pub mod line_items;
pub mod location;
pub mod patterns;
pub mod time;
pub mod totals;
pub mod vendor;

pub use amounts::{currency_amounts, first_amount, parse_amount, scan_amounts, Amount};
pub use dates::{normalize_date, DateExtractor};
pub use doc_type::DocTypeExtractor;
pub use labels::LabelExtractor;
pub use line_items::{extract_line_items, parse_row, segment_rows, RowGroup};
pub use location::LocationExtractor;
pub use time::TimeExtractor;
pub use totals::extract_totals;
pub use vendor::{VendorExtractor, KNOWN_VENDORS};

use std::collections::BTreeMap;

use regex::{Captures, Regex};

use crate::models::notes::Notes;
use crate::models::record::Field;

/// Trait for scalar field extractors.
pub trait FieldExtractor {
    /// The field this extractor fills.
    fn field(&self) -> Field;

    /// Extract the field from normalized text, given the fields extracted
    /// before it.
    fn extract(&self, text: &str, prior: &FieldTable) -> FieldMatch;
}

/// Values of fields extracted so far for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    values: BTreeMap<Field, String>,
}

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: Field, value: String) {
        self.values.insert(field, value);
    }
}

/// Outcome of one field extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMatch {
    pub value: Option<String>,
    pub notes: Notes,
}

impl FieldMatch {
    pub fn found(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            notes: Notes::default(),
        }
    }

    pub fn missing() -> Self {
        Self::default()
    }

    pub fn with_assumption(mut self, note: impl Into<String>) -> Self {
        self.notes.assume(note);
        self
    }

    pub fn with_question(mut self, note: impl Into<String>) -> Self {
        self.notes.ask(note);
        self
    }
}

/// One entry of a prioritized rule list: a pattern and the transform that
/// turns its captures into a value. A transform returning `None` rejects the
/// occurrence and the scan continues.
pub struct Rule {
    pub name: &'static str,
    pub pattern: &'static Regex,
    pub transform: fn(&Captures<'_>) -> Option<String>,
}

/// A value produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that produced it.
    pub rule: &'static str,
}

/// Evaluate `rules` in order against `text`; the first rule with an accepted
/// occurrence wins, and within a rule the earliest occurrence wins.
pub fn first_match(rules: &[Rule], text: &str) -> Option<ExtractionMatch<String>> {
    rules.iter().find_map(|rule| {
        rule.pattern.captures_iter(text).find_map(|caps| {
            let value = (rule.transform)(&caps)?;
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            Some(ExtractionMatch {
                value: value.to_string(),
                rule: rule.name,
            })
        })
    })
}

/// Transform returning capture group 1.
pub fn group1(caps: &Captures<'_>) -> Option<String> {
    caps.get(1).map(|m| m.as_str().to_string())
}

/// Transform returning the whole match.
pub fn whole(caps: &Captures<'_>) -> Option<String> {
    caps.get(0).map(|m| m.as_str().to_string())
}
