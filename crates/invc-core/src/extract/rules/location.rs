//! Store location: an explicit `Location` label, else a street-address block.

use regex::Captures;

use super::patterns::{ADDRESS_BLOCK, ANY_LABEL, LOCATION_LABEL, VALUE_DELIMITER};
use super::{first_match, FieldExtractor, FieldMatch, FieldTable, Rule};
use crate::models::record::Field;

const ADDRESS_RULE: &str = "address block";

/// Vendor location extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationExtractor;

impl LocationExtractor {
    pub fn new() -> Self {
        Self
    }

    fn rules() -> [Rule; 2] {
        [
            Rule {
                name: "location label",
                pattern: &LOCATION_LABEL,
                transform: labeled_location,
            },
            Rule {
                name: ADDRESS_RULE,
                pattern: &ADDRESS_BLOCK,
                transform: address_block,
            },
        ]
    }
}

impl FieldExtractor for LocationExtractor {
    fn field(&self) -> Field {
        Field::VendorLocation
    }

    fn extract(&self, text: &str, _prior: &FieldTable) -> FieldMatch {
        match first_match(&Self::rules(), text) {
            Some(m) if m.rule == ADDRESS_RULE => FieldMatch::found(m.value).with_assumption(
                "vendor location inferred from a street address block (no Location label).",
            ),
            Some(m) => FieldMatch::found(m.value),
            None => FieldMatch::missing(),
        }
    }
}

fn labeled_location(caps: &Captures<'_>) -> Option<String> {
    let rest = caps.get(1)?.as_str();
    let end = [VALUE_DELIMITER.find(rest), ANY_LABEL.find(rest)]
        .into_iter()
        .flatten()
        .map(|m| m.start())
        .min()
        .unwrap_or(rest.len());
    Some(rest[..end].trim().to_string())
}

fn address_block(caps: &Captures<'_>) -> Option<String> {
    let street = caps.get(1)?.as_str().trim();
    let city = caps.get(2)?.as_str().trim();
    Some(format!("{street} {city}"))
}
