//! Invoice field extraction module.

mod assembler;
pub mod rules;

pub use assembler::{extract, ExtractionResult, InvoiceExtractor};
