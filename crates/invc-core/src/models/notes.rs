//! Assumptions and open questions raised during extraction.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Free-text notes for human review.
///
/// Assumptions describe a choice the extractor made on ambiguous input;
/// questions describe something it could not resolve at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notes {
    pub assumptions: Vec<String>,
    pub questions: Vec<String>,
}

impl Notes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an assumption.
    pub fn assume(&mut self, note: impl Into<String>) {
        self.assumptions.push(note.into());
    }

    /// Record an open question.
    pub fn ask(&mut self, note: impl Into<String>) {
        self.questions.push(note.into());
    }

    /// Append all notes from `other`, keeping order.
    pub fn extend(&mut self, other: Notes) {
        self.assumptions.extend(other.assumptions);
        self.questions.extend(other.questions);
    }

    pub fn is_empty(&self) -> bool {
        self.assumptions.is_empty() && self.questions.is_empty()
    }

    /// Prefix every note with `"<source>: "`.
    pub fn prefixed(self, source: &str) -> Notes {
        let prefix = |n: String| format!("{source}: {n}");
        Notes {
            assumptions: self.assumptions.into_iter().map(prefix).collect(),
            questions: self.questions.into_iter().map(prefix).collect(),
        }
    }

    /// Drop repeated notes, keeping the first occurrence of each.
    pub fn dedup(&mut self) {
        dedup_in_order(&mut self.assumptions);
        dedup_in_order(&mut self.questions);
    }
}

fn dedup_in_order(notes: &mut Vec<String>) {
    let mut seen = HashSet::new();
    notes.retain(|n| seen.insert(n.clone()));
}
