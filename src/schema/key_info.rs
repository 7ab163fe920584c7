//! Per-key schema metadata and its lookup interface.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::schema::mapping::IndexMapping;

/// Declared value type of an indexed attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexDataType {
    /// Character data.
    Text,
    /// 64-bit signed integers.
    Long,
    /// 64-bit floating point numbers.
    Double,
    /// Booleans.
    Boolean,
}

impl IndexDataType {
    /// True for types that can participate in full-text/exact-string dual
    /// mapping.
    pub fn is_string_like(&self) -> bool {
        matches!(self, IndexDataType::Text)
    }

    /// True for types with a meaningful total order in range predicates.
    pub fn is_orderable(&self) -> bool {
        matches!(self, IndexDataType::Long | IndexDataType::Double)
    }
}

/// Immutable schema metadata for one logical attribute key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInformation {
    data_type: IndexDataType,
    #[serde(default)]
    mapping: IndexMapping,
}

impl KeyInformation {
    /// Key information with the backend-default mapping.
    pub fn new(data_type: IndexDataType) -> Self {
        KeyInformation {
            data_type,
            mapping: IndexMapping::Default,
        }
    }

    /// Key information with an explicit indexing strategy.
    pub fn with_mapping(data_type: IndexDataType, mapping: IndexMapping) -> Self {
        KeyInformation { data_type, mapping }
    }

    /// The declared value type.
    pub fn data_type(&self) -> IndexDataType {
        self.data_type
    }

    /// The declared indexing strategy.
    pub fn mapping(&self) -> IndexMapping {
        self.mapping
    }
}

/// Read-only lookup of key information, per store.
///
/// Implemented by the surrounding system's schema layer; backends resolve
/// logical keys through this at mutation and query time.
pub trait KeyInformationRetriever: Send + Sync {
    /// Key information for `key` in `store`, or `None` when the key is not
    /// part of the current schema.
    fn get(&self, store: &str, key: &str) -> Option<KeyInformation>;
}

/// A fixed, map-backed [`KeyInformationRetriever`].
#[derive(Debug, Clone, Default)]
pub struct StaticKeyInformation {
    keys: AHashMap<(String, String), KeyInformation>,
}

impl StaticKeyInformation {
    /// Create an empty retriever.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add key information for `key` in `store`, replacing any previous entry.
    pub fn define<S, K>(mut self, store: S, key: K, information: KeyInformation) -> Self
    where
        S: Into<String>,
        K: Into<String>,
    {
        self.keys
            .insert((store.into(), key.into()), information);
        self
    }
}

impl KeyInformationRetriever for StaticKeyInformation {
    fn get(&self, store: &str, key: &str) -> Option<KeyInformation> {
        self.keys
            .get(&(store.to_string(), key.to_string()))
            .copied()
    }
}
