//! Indexed field values and per-document change sets.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SagittaError};
use crate::schema::IndexDataType;

/// A typed value of an indexed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexValue {
    /// Character data.
    Text(String),
    /// 64-bit signed integer.
    Long(i64),
    /// 64-bit floating point number.
    Double(f64),
    /// Boolean.
    Boolean(bool),
}

impl IndexValue {
    /// The schema data type this value belongs to.
    pub fn data_type(&self) -> IndexDataType {
        match self {
            IndexValue::Text(_) => IndexDataType::Text,
            IndexValue::Long(_) => IndexDataType::Long,
            IndexValue::Double(_) => IndexDataType::Double,
            IndexValue::Boolean(_) => IndexDataType::Boolean,
        }
    }

    /// The contained text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            IndexValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric view of the value for ordering predicates, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            IndexValue::Long(value) => Some(*value as f64),
            IndexValue::Double(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for IndexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexValue::Text(text) => write!(f, "{text}"),
            IndexValue::Long(value) => write!(f, "{value}"),
            IndexValue::Double(value) => write!(f, "{value}"),
            IndexValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for IndexValue {
    fn from(value: &str) -> Self {
        IndexValue::Text(value.to_string())
    }
}

impl From<String> for IndexValue {
    fn from(value: String) -> Self {
        IndexValue::Text(value)
    }
}

impl From<i64> for IndexValue {
    fn from(value: i64) -> Self {
        IndexValue::Long(value)
    }
}

impl From<f64> for IndexValue {
    fn from(value: f64) -> Self {
        IndexValue::Double(value)
    }
}

impl From<bool> for IndexValue {
    fn from(value: bool) -> Self {
        IndexValue::Boolean(value)
    }
}

/// One indexed field of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Logical field key.
    pub field: String,
    /// Field value.
    pub value: IndexValue,
}

impl IndexEntry {
    /// Create a new entry.
    pub fn new<F, V>(field: F, value: V) -> Self
    where
        F: Into<String>,
        V: Into<IndexValue>,
    {
        IndexEntry {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Additions and deletions of indexed fields for one document.
///
/// `is_new` marks a document created in this transaction, `is_deleted` one
/// removed entirely; the two are mutually exclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexMutation {
    additions: Vec<IndexEntry>,
    deletions: Vec<IndexEntry>,
    is_new: bool,
    is_deleted: bool,
}

impl IndexMutation {
    /// Create a mutation for an existing document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mutation with explicit lifecycle flags.
    pub fn with_flags(is_new: bool, is_deleted: bool) -> Result<Self> {
        if is_new && is_deleted {
            return Err(SagittaError::configuration(
                "an index mutation cannot mark a document both new and deleted",
            ));
        }
        Ok(IndexMutation {
            additions: Vec::new(),
            deletions: Vec::new(),
            is_new,
            is_deleted,
        })
    }

    /// Add an indexed field.
    pub fn add(mut self, entry: IndexEntry) -> Self {
        self.additions.push(entry);
        self
    }

    /// Remove an indexed field.
    pub fn delete(mut self, entry: IndexEntry) -> Self {
        self.deletions.push(entry);
        self
    }

    /// Fields added by this mutation.
    pub fn additions(&self) -> &[IndexEntry] {
        &self.additions
    }

    /// Fields deleted by this mutation.
    pub fn deletions(&self) -> &[IndexEntry] {
        &self.deletions
    }

    /// True when the document is created by this mutation.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// True when the document is removed entirely.
    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// True when the mutation carries no field changes.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty()
    }
}
