//! Record assembly: runs every extractor over one document.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rules::{
    extract_line_items, extract_totals, DateExtractor, DocTypeExtractor, FieldExtractor,
    FieldMatch, FieldTable, LabelExtractor, LocationExtractor, TimeExtractor, VendorExtractor,
};
use crate::error::ConfigError;
use crate::models::config::{ExtractionConfig, DEFAULT_EXCERPT_LEN};
use crate::models::notes::Notes;
use crate::models::record::{Document, Field, InvoiceRecord};
use crate::normalize::Normalizer;

/// Result of extracting one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The extracted record; every key present, unresolved scalars null.
    pub record: InvoiceRecord,
    /// Assumptions and questions, each prefixed with the source name.
    pub notes: Notes,
}

/// Configured extractor.
///
/// Building it compiles the configured vendor patterns and OCR
/// substitutions; extraction itself cannot fail.
pub struct InvoiceExtractor {
    normalizer: Normalizer,
    fields: Vec<Box<dyn FieldExtractor>>,
    excerpt_len: usize,
}

impl InvoiceExtractor {
    /// Create an extractor from configuration.
    pub fn new(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        if config.raw_excerpt_len == 0 {
            return Err(ConfigError::Value {
                field: "raw_excerpt_len".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self::with_parts(
            Normalizer::new(&config.extra_substitutions)?,
            VendorExtractor::new(&config.extra_vendors)?,
            config.raw_excerpt_len,
        ))
    }

    fn with_parts(normalizer: Normalizer, vendor: VendorExtractor, excerpt_len: usize) -> Self {
        // Vendor first: later extractors may consult it.
        let mut fields: Vec<Box<dyn FieldExtractor>> = vec![
            Box::new(vendor),
            Box::new(LocationExtractor::new()),
            Box::new(DocTypeExtractor::new()),
            Box::new(DateExtractor::new()),
            Box::new(TimeExtractor::new()),
        ];
        fields.extend(
            LabelExtractor::all()
                .into_iter()
                .map(|e| Box::new(e) as Box<dyn FieldExtractor>),
        );

        Self {
            normalizer,
            fields,
            excerpt_len,
        }
    }

    /// Extract a record from one document.
    pub fn extract(&self, document: &Document) -> ExtractionResult {
        let text = self.normalizer.normalize(&document.text);
        let mut record = InvoiceRecord::new(document.source_name.as_str());
        let mut notes = Notes::new();
        let mut prior = FieldTable::new();

        for extractor in &self.fields {
            let field = extractor.field();
            let FieldMatch { value, notes: found } = extractor.extract(&text, &prior);
            record.set(field, value);
            if let Some(value) = record.get(field) {
                prior.insert(field, value.to_string());
            }
            notes.extend(found);
        }

        let (line_items, item_notes) = extract_line_items(&text);
        notes.extend(item_notes);
        if line_items.is_empty() {
            notes.ask("No line items detected; manual review recommended.");
        }
        record.line_items = line_items;

        let (totals, total_notes) = extract_totals(&text);
        notes.extend(total_notes);
        record.totals = totals;

        record.raw_text_excerpt = document.text.chars().take(self.excerpt_len).collect();

        debug!(
            source = %document.source_name,
            missing = ?record.missing_fields().iter().map(Field::key).collect::<Vec<_>>(),
            line_items = record.line_items.len(),
            "extracted record"
        );

        ExtractionResult {
            record,
            notes: notes.prefixed(&document.source_name),
        }
    }
}

impl Default for InvoiceExtractor {
    fn default() -> Self {
        Self::with_parts(Normalizer::default(), VendorExtractor::default(), DEFAULT_EXCERPT_LEN)
    }
}

/// Extract a record from `text` with the built-in tables.
pub fn extract(text: &str, source_name: &str) -> ExtractionResult {
    InvoiceExtractor::default().extract(&Document::new(source_name, text))
}
