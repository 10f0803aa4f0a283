//! Document type (receipt, invoice, estimate, ...).

use regex::Captures;

use super::patterns::INVOICE_TYPE;
use super::{first_match, FieldExtractor, FieldMatch, FieldTable, Rule};
use crate::models::record::Field;

/// Invoice type extractor: first vocabulary word in document order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocTypeExtractor;

impl DocTypeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for DocTypeExtractor {
    fn field(&self) -> Field {
        Field::InvoiceType
    }

    fn extract(&self, text: &str, _prior: &FieldTable) -> FieldMatch {
        let rules = [Rule {
            name: "type vocabulary",
            pattern: &INVOICE_TYPE,
            transform: snake_case,
        }];

        first_match(&rules, text)
            .map(|m| FieldMatch::found(m.value))
            .unwrap_or_default()
    }
}

fn snake_case(caps: &Captures<'_>) -> Option<String> {
    let word = caps.get(1)?.as_str().to_lowercase();
    Some(word.split_whitespace().collect::<Vec<_>>().join("_"))
}
