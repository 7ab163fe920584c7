//! Indexing strategies for logical attribute keys.

use serde::{Deserialize, Serialize};

/// How a logical attribute key is indexed by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMapping {
    /// Backend picks its native default for the value type.
    Default,
    /// Tokenized full-text matching only.
    Text,
    /// Untokenized exact-string matching only.
    ExactString,
    /// Both full-text and exact-string matching for the same attribute.
    /// String-typed attributes with this strategy get a derived exact-string
    /// counterpart field (see `fulltext::FieldMapping`).
    TextString,
}

impl IndexMapping {
    /// True for strategies that include tokenized full-text matching.
    pub fn is_full_text(&self) -> bool {
        matches!(self, IndexMapping::Text | IndexMapping::TextString)
    }

    /// True for strategies that include exact-string matching.
    pub fn is_exact_string(&self) -> bool {
        matches!(self, IndexMapping::ExactString | IndexMapping::TextString)
    }
}

impl Default for IndexMapping {
    fn default() -> Self {
        IndexMapping::Default
    }
}
