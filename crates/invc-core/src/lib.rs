//! Core library for heuristic invoice and receipt extraction.
//!
//! This crate provides:
//! - OCR text normalization (whitespace, known label misreads)
//! - Rule-based field extraction (vendor, location, dates, labeled fields)
//! - Line-item table segmentation and row parsing
//! - Totals extraction
//! - Batch result merging with de-duplicated review notes
//!
//! It performs no file I/O: callers hand in decoded text and get back a
//! schema-stable [`InvoiceRecord`] plus assumptions and questions.

pub mod batch;
pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;

pub use batch::{BatchResult, FileStats};
pub use error::{ConfigError, InvcError, Result};
pub use extract::{extract, ExtractionResult, InvoiceExtractor};
pub use models::config::{ExtractionConfig, InvcConfig, OutputConfig};
pub use models::notes::Notes;
pub use models::record::{Document, Field, InvoiceRecord, LineItem, Totals};
pub use normalize::{normalize, Normalizer};
