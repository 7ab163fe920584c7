//! Logical-key to physical-field resolution for full-text backends.
//!
//! An attribute declared with the [`IndexMapping::TextString`] strategy must be
//! searchable both as tokenized text and as one exact string. Backends store it
//! twice: under its own name (tokenized) and under a derived name carrying a
//! reserved suffix (untokenized). Because the derivation is a pure string
//! convention, translating a physical field name back to its logical key never
//! needs a side table; it runs on every returned field name in hot query paths.

use crate::error::{Result, SagittaError};
use crate::schema::{IndexDataType, IndexMapping, KeyInformation};

/// Reserved marker appended to a logical key to name its exact-string
/// counterpart field. No legitimate logical key may end in this marker;
/// `validate_logical_key` enforces that at registration time.
const STRING_SUFFIX: &str = "_____s";

/// The resolved physical identity of one indexed field.
///
/// Constructed per attribute at schema-registration or query-resolution time,
/// immutable, and never persisted: it is recomputed from schema metadata on
/// each access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    field_key: String,
    mapping: Option<IndexMapping>,
    data_type: Option<IndexDataType>,
}

impl FieldMapping {
    /// Resolve `index_key` against its schema metadata.
    ///
    /// A key already carrying the reserved marker is treated as
    /// already-physical: it denotes the exact-string counterpart field, so its
    /// strategy and type are fixed independent of `information`. This guards
    /// against double derivation. Absent `information` leaves strategy and
    /// type unset, the valid "unknown field" state used when resolving
    /// query-time names not present in the current schema.
    pub fn new(index_key: &str, information: Option<&KeyInformation>) -> Self {
        if index_key.ends_with(STRING_SUFFIX) {
            return FieldMapping {
                field_key: index_key.to_string(),
                mapping: Some(IndexMapping::ExactString),
                data_type: Some(IndexDataType::Text),
            };
        }
        FieldMapping {
            field_key: index_key.to_string(),
            mapping: information.map(|i| i.mapping()),
            data_type: information.map(|i| i.data_type()),
        }
    }

    /// The physical field name stored and queried in the backend.
    pub fn field_key(&self) -> &str {
        &self.field_key
    }

    /// The resolved indexing strategy, when known.
    pub fn mapping(&self) -> Option<IndexMapping> {
        self.mapping
    }

    /// The resolved value type, when known.
    pub fn data_type(&self) -> Option<IndexDataType> {
        self.data_type
    }

    /// The derived exact-string counterpart of this field, if it has one.
    ///
    /// Exactly one counterpart exists when the value type is string-like and
    /// the strategy is [`IndexMapping::TextString`]; every other combination
    /// derives nothing.
    pub fn dual_mapping(&self) -> Option<FieldMapping> {
        let string_like = self.data_type.is_some_and(|t| t.is_string_like());
        if string_like && self.mapping == Some(IndexMapping::TextString) {
            let derived = format!("{}{}", self.field_key, STRING_SUFFIX);
            return Some(FieldMapping::new(&derived, None));
        }
        None
    }

    /// Translate a physical field name back to its logical key.
    ///
    /// Strips one trailing marker if present, otherwise returns the name
    /// unchanged. Stripping then re-appending the marker reproduces the
    /// original name exactly.
    pub fn mapped_name(field_name: &str) -> &str {
        field_name.strip_suffix(STRING_SUFFIX).unwrap_or(field_name)
    }

    /// Reject logical keys that collide with the reserved marker.
    ///
    /// A user-chosen key ending in the marker would be silently misclassified
    /// as already-physical on every later resolution, so registration must
    /// refuse it up front.
    pub fn validate_logical_key(key: &str) -> Result<()> {
        if key.ends_with(STRING_SUFFIX) {
            return Err(SagittaError::configuration(format!(
                "logical key '{key}' ends with the reserved field-name suffix '{STRING_SUFFIX}'"
            )));
        }
        Ok(())
    }
}
