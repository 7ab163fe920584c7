//! Transparent per-operation instrumentation for index providers.

use crate::error::Result;
use crate::metrics::MetricRegistry;
use crate::provider::{
    DocIdStream, DocumentsByStore, IndexFeatures, IndexPredicate, IndexProvider, IndexQuery,
    IndexTransaction, MutationsByStore, RawHitStream, RawQuery, TransactionConfig,
};
use crate::schema::{KeyInformation, KeyInformationRetriever};

const M_MUTATE: &str = "mutate";
const M_RESTORE: &str = "restore";
const M_QUERY: &str = "query";
const M_RAW_QUERY: &str = "rawQuery";
const M_TOTALS: &str = "totals";
const M_CALLS: &str = "calls";
const M_TIME: &str = "time";
const M_EXCEPTIONS: &str = "exceptions";

/// An [`IndexProvider`] that measures another one.
///
/// For each of the potentially expensive operations (`mutate`, `restore`,
/// `query`, `rawQuery`, `totals`) the wrapper counts calls, times execution,
/// and counts failures under `prefix.operation.{calls,time,exceptions}` in the
/// given registry. Everything else passes straight through. The wrapped
/// provider's results and errors are returned untouched, so callers cannot
/// observe the measurement.
///
/// A `prefix` of `None` disables instrumentation entirely: the wrapper then
/// never touches the registry.
pub struct MetricInstrumentedIndexProvider<I> {
    index_provider: I,
    prefix: Option<String>,
    metrics: MetricRegistry,
}

impl<I: IndexProvider> MetricInstrumentedIndexProvider<I> {
    /// Wrap `index_provider`, reporting under `prefix` into `metrics`.
    pub fn new(index_provider: I, prefix: Option<String>, metrics: MetricRegistry) -> Self {
        MetricInstrumentedIndexProvider {
            index_provider,
            prefix,
            metrics,
        }
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &I {
        &self.index_provider
    }

    /// Unwrap, returning the inner provider.
    pub fn into_inner(self) -> I {
        self.index_provider
    }

    fn run_with_metrics<T>(&self, name: &str, operation: impl FnOnce() -> Result<T>) -> Result<T> {
        let Some(prefix) = self.prefix.as_deref() else {
            return operation();
        };

        self.metrics.counter(prefix, name, M_CALLS).increment();
        // The timer context records on drop, so the timing is stopped exactly
        // once on success, failure, and unwind alike.
        let _timer = self.metrics.timer(prefix, name, M_TIME).start();
        let outcome = operation();
        if outcome.is_err() {
            self.metrics.counter(prefix, name, M_EXCEPTIONS).increment();
        }
        outcome
    }
}

impl<I: IndexProvider> IndexProvider for MetricInstrumentedIndexProvider<I> {
    fn register(
        &self,
        store: &str,
        key: &str,
        information: &KeyInformation,
        tx: &mut dyn IndexTransaction,
    ) -> Result<()> {
        self.index_provider.register(store, key, information, tx)
    }

    fn mutate(
        &self,
        mutations: MutationsByStore,
        information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<()> {
        self.run_with_metrics(M_MUTATE, || {
            self.index_provider.mutate(mutations, information, tx)
        })
    }

    fn restore(
        &self,
        documents: DocumentsByStore,
        information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<()> {
        self.run_with_metrics(M_RESTORE, || {
            self.index_provider.restore(documents, information, tx)
        })
    }

    fn query(
        &self,
        query: &IndexQuery,
        information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<DocIdStream> {
        self.run_with_metrics(M_QUERY, || {
            self.index_provider.query(query, information, tx)
        })
    }

    fn raw_query(
        &self,
        query: &RawQuery,
        information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<RawHitStream> {
        self.run_with_metrics(M_RAW_QUERY, || {
            self.index_provider.raw_query(query, information, tx)
        })
    }

    fn totals(
        &self,
        query: &RawQuery,
        information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<u64> {
        self.run_with_metrics(M_TOTALS, || {
            self.index_provider.totals(query, information, tx)
        })
    }

    fn begin_transaction(&self, config: TransactionConfig) -> Result<Box<dyn IndexTransaction>> {
        self.index_provider.begin_transaction(config)
    }

    fn close(&self) -> Result<()> {
        self.index_provider.close()
    }

    fn clear_storage(&self) -> Result<()> {
        self.index_provider.clear_storage()
    }

    fn exists(&self) -> Result<bool> {
        self.index_provider.exists()
    }

    fn supports(&self, information: &KeyInformation) -> bool {
        self.index_provider.supports(information)
    }

    fn supports_predicate(
        &self,
        information: &KeyInformation,
        predicate: IndexPredicate,
    ) -> bool {
        self.index_provider.supports_predicate(information, predicate)
    }

    fn map_key_to_field(&self, key: &str, information: &KeyInformation) -> String {
        self.index_provider.map_key_to_field(key, information)
    }

    fn features(&self) -> IndexFeatures {
        self.index_provider.features()
    }
}
