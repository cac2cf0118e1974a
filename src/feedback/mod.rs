//! Structured translation results
//!
//! Machine-readable output for host UIs and tooling:
//! - the generated Python source
//! - phrase-to-code provenance mappings
//! - confidence, alternatives, follow-up suggestions
//! - the set of curriculum concepts exercised

use serde::{Deserialize, Serialize};

/// The seven concept levels a translation may exercise, ordered by
/// curriculum level (output first, functions last).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ConceptTag {
    Print,
    Variables,
    Math,
    Conditions,
    Loops,
    Lists,
    Functions,
}

/// How sure the engine is about a translation.
///
/// Starts at `High` and is only ever lowered, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    fn rank(self) -> u8 {
        match self {
            Confidence::High => 2,
            Confidence::Medium => 1,
            Confidence::Low => 0,
        }
    }

    /// The lower of two confidence levels.
    pub fn min(self, other: Confidence) -> Confidence {
        if other.rank() < self.rank() {
            other
        } else {
            self
        }
    }
}

/// Provenance record linking an input phrase to the exact output fragment
/// it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    /// The recognized English phrase
    pub source_phrase: String,

    /// The Python fragment it produced
    pub generated_fragment: String,

    /// 1-based line in the generated code; 0 for synthetic entries such as
    /// auto-inserted imports
    pub line_number: usize,

    /// Why this Python syntax works
    pub explanation: String,

    /// Optional beginner tip about the concept involved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub educational_note: Option<String>,
}

/// An alternative rendering of part of the translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    /// Short name of the alternative
    pub description: String,

    /// The alternative Python code
    pub code: String,

    /// When to prefer this form
    pub reason: String,
}

/// The complete result of one translation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    /// Runnable Python 3 source
    pub generated_code: String,

    /// One or two beginner-friendly sentences about what the code does
    pub explanation: String,

    /// Phrase-to-code provenance, in document order
    pub mappings: Vec<Mapping>,

    /// Alternative renderings, when meaningful
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<Alternative>,

    pub confidence: Confidence,

    /// Follow-up things to try, populated for clarification results
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,

    /// Which of the seven concepts this translation exercises
    pub concepts: Vec<ConceptTag>,

    /// Whether the input fell outside the seven supported concepts
    pub out_of_scope: bool,
}

impl Translation {
    /// Output as pretty-printed JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Output as compact JSON (for programmatic use)
    pub fn to_json_compact(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
