//! Batch result merging.
//!
//! File discovery and output writing live in the binary; this module only
//! collects per-document results into the batch output shape.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::extract::ExtractionResult;
use crate::models::notes::Notes;
use crate::models::record::InvoiceRecord;

/// Output of a batch run: `{"invoices": [...], "assumptions": [...], "questions": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub invoices: Vec<InvoiceRecord>,
    #[serde(flatten)]
    pub notes: Notes,
}

/// Per-document statistics for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    pub file: String,
    pub line_items: usize,
    pub totals_found: usize,
}

impl FileStats {
    pub fn of(record: &InvoiceRecord) -> Self {
        Self {
            file: record.source_file.clone(),
            line_items: record.line_items.len(),
            totals_found: record.totals.found(),
        }
    }
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document's result.
    pub fn push(&mut self, result: ExtractionResult) -> FileStats {
        let stats = FileStats::of(&result.record);
        info!(
            file = %stats.file,
            line_items = stats.line_items,
            totals = stats.totals_found,
            "processed document"
        );

        self.invoices.push(result.record);
        self.notes.extend(result.notes);
        stats
    }

    /// Record a document that could not be read at all.
    pub fn skip(&mut self, source: &str, reason: &str) {
        self.notes
            .ask(format!("{source}: could not be read ({reason}); skipped."));
    }

    /// Statistics for every collected document, in input order.
    pub fn stats(&self) -> Vec<FileStats> {
        self.invoices.iter().map(FileStats::of).collect()
    }

    /// Finish the batch: repeated notes are dropped, first occurrence kept.
    pub fn finish(mut self) -> Self {
        self.notes.dedup();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_batch_shape() {
        let mut batch = BatchResult::new();
        batch.push(extract("MENARDS\nTOTAL $5.00", "a.txt"));
        let batch = batch.finish();

        let json = serde_json::to_string(&batch).unwrap();
        assert!(json.starts_with(r#"{"invoices":[{"source_file":"a.txt","vendor_name":"Menards""#));
        let assumptions = json.find(r#""assumptions":"#).unwrap();
        let questions = json.find(r#""questions":"#).unwrap();
        assert!(assumptions < questions);
    }

    #[test]
    fn test_notes_deduplicated_in_order() {
        let mut batch = BatchResult::new();
        let first = extract("nothing", "same.txt");
        batch.push(first.clone());
        batch.push(first.clone());
        batch.skip("bad.txt", "permission denied");
        let batch = batch.finish();

        assert_eq!(batch.invoices.len(), 2);
        assert_eq!(batch.notes.assumptions, first.notes.assumptions);

        let mut expected = first.notes.questions.clone();
        expected.push("bad.txt: could not be read (permission denied); skipped.".to_string());
        assert_eq!(batch.notes.questions, expected);
    }

    #[test]
    fn test_stats() {
        let mut batch = BatchResult::new();
        let stats = batch.push(extract("Subtotal $1.00\nOrder Total $1.07", "t.txt"));
        assert_eq!(
            stats,
            FileStats {
                file: "t.txt".to_string(),
                line_items: 0,
                totals_found: 2,
            }
        );
        assert_eq!(batch.stats(), vec![stats]);
    }
}
