//! Configuration structures for extraction and batch output.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default length of the raw text excerpt, in characters.
pub const DEFAULT_EXCERPT_LEN: usize = 500;

/// Main configuration for invc.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvcConfig {
    /// Invoice extraction configuration.
    pub extraction: ExtractionConfig,

    /// Batch input/output locations.
    pub output: OutputConfig,
}

/// Invoice extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of characters of original text kept in `raw_text_excerpt`.
    pub raw_excerpt_len: usize,

    /// Vendors recognized in addition to the built-in table.
    pub extra_vendors: Vec<VendorEntry>,

    /// OCR misreads rewritten in addition to the built-in table.
    pub extra_substitutions: Vec<SubstitutionEntry>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            raw_excerpt_len: DEFAULT_EXCERPT_LEN,
            extra_vendors: Vec::new(),
            extra_substitutions: Vec::new(),
        }
    }
}

/// A known-vendor entry: a case-insensitive regex and the canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorEntry {
    pub pattern: String,
    pub name: String,
}

/// An OCR misread and its canonical spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionEntry {
    pub from: String,
    pub to: String,
}

/// Batch input/output locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory scanned for `*.txt` documents.
    pub inbox_dir: PathBuf,

    /// Directory receiving `invoices.json` and reports.
    pub out_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            inbox_dir: PathBuf::from("inbox"),
            out_dir: PathBuf::from("out"),
        }
    }
}

impl InvcConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: InvcConfig = serde_json::from_str(
            r#"{"extraction": {"extra_vendors": [{"pattern": "acme\\s+lumber", "name": "Acme Lumber"}]}}"#,
        )
        .unwrap();

        assert_eq!(config.extraction.raw_excerpt_len, DEFAULT_EXCERPT_LEN);
        assert_eq!(config.extraction.extra_vendors.len(), 1);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InvcConfig::default();
        config.extraction.raw_excerpt_len = 200;
        config.extraction.extra_substitutions.push(SubstitutionEntry {
            from: "Ordep #".to_string(),
            to: "Order #".to_string(),
        });
        config.save(&path).unwrap();

        assert_eq!(InvcConfig::from_file(&path).unwrap(), config);
    }
}
