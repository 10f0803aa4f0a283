//! Text normalization applied before any field matching.
//!
//! Whitespace is collapsed line by line (row boundaries matter to the
//! line-oriented extractors), then known OCR misreads of label tokens are
//! rewritten to their canonical spelling so that extractors only need to
//! match canonical labels.

use lazy_static::lazy_static;
use regex::{NoExpand, Regex, RegexBuilder};

use crate::error::ConfigError;
use crate::models::config::SubstitutionEntry;

/// Built-in OCR misreads of label tokens, as `(misread, canonical)`.
pub const OCR_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("Ofdler #", "Order #"),
    ("0rder #", "Order #"),
    ("Orcler #", "Order #"),
    ("Ordcr #", "Order #"),
    ("P0 #", "PO #"),
    ("P0 Number", "PO Number"),
    ("5tore", "Store"),
    ("St0re", "Store"),
    ("Sa1es", "Sales"),
    ("Subtota1", "Subtotal"),
    ("Sub-tota1", "Sub-total"),
    ("T0tal", "Total"),
    ("Tota1", "Total"),
    ("Locatlon", "Location"),
];

lazy_static! {
    static ref BUILTIN: Vec<(Regex, String)> = OCR_SUBSTITUTIONS
        .iter()
        .map(|(from, to)| (substitution_regex(from).unwrap(), to.to_string()))
        .collect();
}

/// Normalizes raw document text.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    extra: Vec<(Regex, String)>,
}

impl Normalizer {
    /// Create a normalizer using the built-in table plus `extra` entries,
    /// which are applied after the built-in ones.
    pub fn new(extra: &[SubstitutionEntry]) -> Result<Self, ConfigError> {
        let extra = extra
            .iter()
            .map(|entry| {
                substitution_regex(&entry.from)
                    .map(|re| (re, entry.to.clone()))
                    .map_err(|reason| ConfigError::Substitution {
                        from: entry.from.clone(),
                        reason,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { extra })
    }

    /// Normalize text: unify line endings, collapse whitespace within each
    /// line, trim lines, and rewrite known OCR misreads.
    pub fn normalize(&self, text: &str) -> String {
        let unified = text.replace("\r\n", "\n").replace('\r', "\n");

        let mut normalized = unified
            .split('\n')
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join("\n");

        for (re, to) in BUILTIN.iter().chain(self.extra.iter()) {
            if re.is_match(&normalized) {
                normalized = re.replace_all(&normalized, NoExpand(to)).into_owned();
            }
        }

        normalized
    }
}

/// Normalize with the built-in substitution table only.
pub fn normalize(text: &str) -> String {
    Normalizer::default().normalize(text)
}

/// Compile a literal misread into a case-insensitive, word-bounded regex.
/// Whitespace inside the misread matches any (including no) whitespace.
fn substitution_regex(from: &str) -> Result<Regex, String> {
    let tokens: Vec<String> = from.split_whitespace().map(regex::escape).collect();
    if tokens.is_empty() {
        return Err("empty pattern".to_string());
    }

    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let trimmed = from.trim();

    let mut pattern = String::new();
    if is_word(trimmed.chars().next()) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&tokens.join(r"[ \t]*"));
    if is_word(trimmed.chars().last()) {
        pattern.push_str(r"\b");
    }

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| e.to_string())
}
