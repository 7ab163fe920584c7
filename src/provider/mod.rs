//! The backend-agnostic index provider contract.
//!
//! Every search-index backend plugs into the graph database by implementing
//! [`IndexProvider`]. The indexing layer talks only to this trait; cross
//! cutting concerns compose structurally around it (see
//! [`MetricInstrumentedIndexProvider`]).

pub mod entry;
pub mod features;
pub mod instrumented;
pub mod query;
pub mod transaction;

use std::collections::HashMap;

pub use entry::{IndexEntry, IndexMutation, IndexValue};
pub use features::{IndexFeatures, IndexFeaturesBuilder};
pub use instrumented::MetricInstrumentedIndexProvider;
pub use query::{Condition, IndexOrder, IndexPredicate, IndexQuery, RawHit, RawQuery};
pub use transaction::{IndexTransaction, TransactionConfig};

use crate::error::Result;
use crate::schema::{KeyInformation, KeyInformationRetriever};

/// Index mutations grouped by store name, then by document id.
pub type MutationsByStore = HashMap<String, HashMap<String, IndexMutation>>;

/// Authoritative document snapshots grouped by store name, then by document id.
pub type DocumentsByStore = HashMap<String, HashMap<String, Vec<IndexEntry>>>;

/// A lazy, single-pass stream of matching document ids.
///
/// Exhausting or dropping it is the only way to finish a query; a fresh
/// provider call re-executes the query from scratch.
pub type DocIdStream = Box<dyn Iterator<Item = String> + Send>;

/// A lazy, single-pass stream of scored raw-query hits.
pub type RawHitStream = Box<dyn Iterator<Item = RawHit> + Send>;

/// The contract every search-index backend must satisfy.
///
/// All operations except the pure probes (`supports*`, `map_key_to_field`,
/// `features`) may block on backend I/O and fail with
/// [`SagittaError::Backend`](crate::error::SagittaError::Backend) carrying the
/// backend's native error. Implementations impose no internal threading; the
/// caller invokes blocking operations from its own worker pool.
pub trait IndexProvider: Send + Sync {
    /// Declare or ensure the indexing configuration of `key` in `store`.
    /// Idempotent: re-registering identical information is a no-op.
    fn register(
        &self,
        store: &str,
        key: &str,
        information: &KeyInformation,
        tx: &mut dyn IndexTransaction,
    ) -> Result<()>;

    /// Apply additions and deletions of indexed fields per document per store,
    /// scoped to `tx`.
    fn mutate(
        &self,
        mutations: MutationsByStore,
        information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<()>;

    /// Bulk-load index state from an authoritative snapshot, replacing the
    /// affected documents wholesale instead of mutating them incrementally.
    fn restore(
        &self,
        documents: DocumentsByStore,
        information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<()>;

    /// Execute a typed query, yielding matching document ids in backend
    /// relevance/native order.
    fn query(
        &self,
        query: &IndexQuery,
        information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<DocIdStream>;

    /// Execute a backend-native query, yielding scored hits.
    fn raw_query(
        &self,
        query: &RawQuery,
        information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<RawHitStream>;

    /// Count the matches of a raw query without materializing results.
    ///
    /// Must be consistent with what [`raw_query`](IndexProvider::raw_query)
    /// would enumerate for the same inputs and transaction.
    fn totals(
        &self,
        query: &RawQuery,
        information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<u64>;

    /// Open a new transaction.
    fn begin_transaction(&self, config: TransactionConfig) -> Result<Box<dyn IndexTransaction>>;

    /// Release backend resources. Operations after close fail.
    fn close(&self) -> Result<()>;

    /// Delete all stored index data.
    fn clear_storage(&self) -> Result<()>;

    /// True when the backend holds any index data.
    fn exists(&self) -> Result<bool>;

    /// Capability probe: can this backend index a key declared like
    /// `information`? Pure function of schema metadata, no I/O.
    fn supports(&self, information: &KeyInformation) -> bool;

    /// Capability probe: can this backend answer `predicate` against a key
    /// declared like `information`? Pure function of schema metadata, no I/O.
    fn supports_predicate(
        &self,
        information: &KeyInformation,
        predicate: IndexPredicate,
    ) -> bool;

    /// Resolve the physical backend field name for a logical key.
    fn map_key_to_field(&self, key: &str, information: &KeyInformation) -> String;

    /// The backend's static capability set.
    fn features(&self) -> IndexFeatures;
}
