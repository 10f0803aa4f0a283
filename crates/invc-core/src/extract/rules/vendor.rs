//! Vendor detection from a known-vendor table.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

use super::{FieldExtractor, FieldMatch, FieldTable};
use crate::error::ConfigError;
use crate::models::config::VendorEntry;
use crate::models::record::Field;

/// Built-in known vendors as `(case-insensitive pattern, canonical name)`,
/// in match priority order.
pub const KNOWN_VENDORS: &[(&str, &str)] = &[
    (r"home\s+depot", "The Home Depot"),
    (r"homedepot\.com", "The Home Depot"),
    (r"\blowe['’]?s\b", "Lowe's"),
    (r"menards", "Menards"),
    (r"ace\s+hardware", "Ace Hardware"),
    (r"harbor\s+freight", "Harbor Freight"),
    (r"grainger", "Grainger"),
    (r"fastenal", "Fastenal"),
    (r"amazon", "Amazon"),
];

lazy_static! {
    static ref BUILTIN: Vec<(Regex, String)> = KNOWN_VENDORS
        .iter()
        .map(|(pattern, name)| (vendor_regex(pattern).unwrap(), name.to_string()))
        .collect();
}

/// Vendor extractor: the first table entry found anywhere in the text wins.
#[derive(Debug, Clone, Default)]
pub struct VendorExtractor {
    extra: Vec<(Regex, String)>,
}

impl VendorExtractor {
    /// Create an extractor using the built-in table followed by `extra`.
    pub fn new(extra: &[VendorEntry]) -> Result<Self, ConfigError> {
        let extra = extra
            .iter()
            .map(|entry| {
                vendor_regex(&entry.pattern)
                    .map(|re| (re, entry.name.clone()))
                    .map_err(|e| ConfigError::VendorPattern {
                        name: entry.name.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { extra })
    }

    /// Canonical vendor name for `text`, if any entry matches.
    pub fn identify(&self, text: &str) -> Option<&str> {
        BUILTIN
            .iter()
            .chain(self.extra.iter())
            .find(|(re, _)| re.is_match(text))
            .map(|(_, name)| name.as_str())
    }
}

impl FieldExtractor for VendorExtractor {
    fn field(&self) -> Field {
        Field::VendorName
    }

    fn extract(&self, text: &str, _prior: &FieldTable) -> FieldMatch {
        match self.identify(text) {
            Some(name) => FieldMatch::found(name),
            None => FieldMatch::missing()
                .with_assumption("vendor could not be identified from known patterns.")
                .with_question("What vendor issued this invoice?"),
        }
    }
}

fn vendor_regex(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}
