//! Capability description of an index backend.

use ahash::AHashSet;

use crate::schema::{IndexDataType, IndexMapping};

/// The static capability set advertised by an index provider.
///
/// Built once per provider and answered from memory; probing a feature never
/// touches the backend.
#[derive(Debug, Clone)]
pub struct IndexFeatures {
    supported_mappings: AHashSet<IndexMapping>,
    supported_data_types: AHashSet<IndexDataType>,
    supports_order: bool,
    supports_not_queries: bool,
    supports_raw_queries: bool,
}

impl IndexFeatures {
    /// Start building a feature set.
    pub fn builder() -> IndexFeaturesBuilder {
        IndexFeaturesBuilder::default()
    }

    /// True when the backend can index with the given strategy.
    pub fn supports_mapping(&self, mapping: IndexMapping) -> bool {
        self.supported_mappings.contains(&mapping)
    }

    /// True when the backend can index values of the given type.
    pub fn supports_data_type(&self, data_type: IndexDataType) -> bool {
        self.supported_data_types.contains(&data_type)
    }

    /// True when the backend honors requested result orderings.
    pub fn supports_order(&self) -> bool {
        self.supports_order
    }

    /// True when the backend evaluates negated conditions.
    pub fn supports_not_queries(&self) -> bool {
        self.supports_not_queries
    }

    /// True when the backend accepts native-syntax raw queries.
    pub fn supports_raw_queries(&self) -> bool {
        self.supports_raw_queries
    }
}

/// Builder for [`IndexFeatures`].
#[derive(Debug, Default)]
pub struct IndexFeaturesBuilder {
    supported_mappings: AHashSet<IndexMapping>,
    supported_data_types: AHashSet<IndexDataType>,
    supports_order: bool,
    supports_not_queries: bool,
    supports_raw_queries: bool,
}

impl IndexFeaturesBuilder {
    /// Declare a supported indexing strategy.
    pub fn mapping(mut self, mapping: IndexMapping) -> Self {
        self.supported_mappings.insert(mapping);
        self
    }

    /// Declare a supported value type.
    pub fn data_type(mut self, data_type: IndexDataType) -> Self {
        self.supported_data_types.insert(data_type);
        self
    }

    /// Declare that requested orderings are honored.
    pub fn order(mut self) -> Self {
        self.supports_order = true;
        self
    }

    /// Declare that negated conditions are evaluated.
    pub fn not_queries(mut self) -> Self {
        self.supports_not_queries = true;
        self
    }

    /// Declare that native-syntax raw queries are accepted.
    pub fn raw_queries(mut self) -> Self {
        self.supports_raw_queries = true;
        self
    }

    /// Finish building.
    pub fn build(self) -> IndexFeatures {
        IndexFeatures {
            supported_mappings: self.supported_mappings,
            supported_data_types: self.supported_data_types,
            supports_order: self.supports_order,
            supports_not_queries: self.supports_not_queries,
            supports_raw_queries: self.supports_raw_queries,
        }
    }
}
