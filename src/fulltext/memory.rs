//! In-memory index provider.
//!
//! The reference [`IndexProvider`] implementation: documents live in
//! fixed-capacity segments per store, which double as the scan partitions fed
//! to the [`DocumentCollector`]. Useful for tests and for temporary indexes;
//! everything is lost on drop.
//!
//! Raw queries use the native syntax `field:term [field:term ...]` where every
//! clause must match. Terms are matched against whitespace tokens
//! case-insensitively, except on derived exact-string fields where the whole
//! stored value must match exactly.

use std::any::Any;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::{Result, SagittaError};
use crate::fulltext::collector::{DocumentCollector, Scorer};
use crate::fulltext::field_mapping::FieldMapping;
use crate::provider::{
    Condition, DocIdStream, DocumentsByStore, IndexFeatures, IndexPredicate, IndexProvider,
    IndexQuery, IndexTransaction, IndexValue, MutationsByStore, RawHit, RawHitStream, RawQuery,
    TransactionConfig,
};
use crate::schema::{IndexDataType, IndexMapping, KeyInformation, KeyInformationRetriever};

/// Default number of documents per segment.
pub const DEFAULT_SEGMENT_CAPACITY: usize = 128;

#[derive(Debug, Clone)]
struct Document {
    key: String,
    fields: AHashMap<String, IndexValue>,
    deleted: bool,
}

#[derive(Debug, Default)]
struct Segment {
    docs: Vec<Document>,
}

#[derive(Debug, Clone, Copy)]
struct DocLocation {
    segment: usize,
    ordinal: usize,
}

#[derive(Debug, Default)]
struct StoreData {
    registered: AHashMap<String, KeyInformation>,
    segments: Vec<Segment>,
    locations: AHashMap<String, DocLocation>,
}

#[derive(Debug)]
struct Inner {
    segment_capacity: usize,
    stores: AHashMap<String, StoreData>,
    closed: bool,
}

/// A buffered change staged in a [`MemoryTransaction`].
#[derive(Debug)]
enum PendingOp {
    Mutate {
        store: String,
        doc_id: String,
        additions: Vec<(String, IndexValue)>,
        deletions: Vec<String>,
        is_deleted: bool,
    },
    Restore {
        store: String,
        doc_id: String,
        fields: Option<Vec<(String, IndexValue)>>,
    },
}

/// Transaction handle issued by [`MemoryIndexProvider`].
///
/// Mutations and restores buffer here; nothing is visible to queries until
/// [`commit`](IndexTransaction::commit). Rollback discards the buffer.
#[derive(Debug)]
pub struct MemoryTransaction {
    inner: Arc<RwLock<Inner>>,
    config: TransactionConfig,
    pending: Vec<PendingOp>,
}

impl MemoryTransaction {
    /// The configuration this transaction was opened with.
    pub fn config(&self) -> &TransactionConfig {
        &self.config
    }

    /// Number of buffered operations.
    pub fn pending_ops(&self) -> usize {
        self.pending.len()
    }
}

impl IndexTransaction for MemoryTransaction {
    fn commit(&mut self) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.closed {
            return Err(SagittaError::transaction(
                "cannot commit: index provider is closed",
            ));
        }
        let ops = std::mem::take(&mut self.pending);
        let count = ops.len();
        for op in ops {
            inner.apply(op);
        }
        debug!(ops = count, "committed memory index transaction");
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        let discarded = self.pending.len();
        self.pending.clear();
        debug!(ops = discarded, "rolled back memory index transaction");
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Inner {
    fn apply(&mut self, op: PendingOp) {
        match op {
            PendingOp::Mutate {
                store,
                doc_id,
                additions,
                deletions,
                is_deleted,
            } => {
                let segment_capacity = self.segment_capacity;
                let store_data = self.stores.entry(store).or_default();
                if is_deleted {
                    store_data.remove_doc(&doc_id);
                    return;
                }
                let location = store_data.get_or_insert_doc(&doc_id, segment_capacity);
                let doc = &mut store_data.segments[location.segment].docs[location.ordinal];
                for field in deletions {
                    doc.fields.remove(&field);
                }
                for (field, value) in additions {
                    doc.fields.insert(field, value);
                }
            }
            PendingOp::Restore {
                store,
                doc_id,
                fields,
            } => {
                let segment_capacity = self.segment_capacity;
                let store_data = self.stores.entry(store).or_default();
                match fields {
                    None => store_data.remove_doc(&doc_id),
                    Some(fields) => {
                        let location = store_data.get_or_insert_doc(&doc_id, segment_capacity);
                        let doc =
                            &mut store_data.segments[location.segment].docs[location.ordinal];
                        doc.fields = fields.into_iter().collect();
                    }
                }
            }
        }
    }
}

impl StoreData {
    fn get_or_insert_doc(&mut self, doc_id: &str, segment_capacity: usize) -> DocLocation {
        if let Some(location) = self.locations.get(doc_id) {
            return *location;
        }
        let needs_segment = self
            .segments
            .last()
            .is_none_or(|segment| segment.docs.len() >= segment_capacity);
        if needs_segment {
            self.segments.push(Segment::default());
        }
        let segment = self.segments.len() - 1;
        let ordinal = self.segments[segment].docs.len();
        self.segments[segment].docs.push(Document {
            key: doc_id.to_string(),
            fields: AHashMap::new(),
            deleted: false,
        });
        let location = DocLocation { segment, ordinal };
        self.locations.insert(doc_id.to_string(), location);
        location
    }

    fn remove_doc(&mut self, doc_id: &str) {
        if let Some(location) = self.locations.remove(doc_id) {
            let doc = &mut self.segments[location.segment].docs[location.ordinal];
            doc.deleted = true;
            doc.fields.clear();
        }
    }

    /// Resolve a collector's global document id back to the document key.
    fn key_for_global(&self, global: u64) -> Option<&str> {
        let mut base = 0u64;
        for segment in &self.segments {
            let len = segment.docs.len() as u64;
            if global < base + len {
                return Some(&segment.docs[(global - base) as usize].key);
            }
            base += len;
        }
        None
    }
}

/// One parsed clause of the raw query syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawClause {
    field: String,
    term: String,
}

fn parse_raw_query(query: &str) -> Result<Vec<RawClause>> {
    let mut clauses = Vec::new();
    for token in query.split_whitespace() {
        let (field, term) = token.split_once(':').ok_or_else(|| {
            SagittaError::query(format!("raw query clause '{token}' is not of form field:term"))
        })?;
        if field.is_empty() || term.is_empty() {
            return Err(SagittaError::query(format!(
                "raw query clause '{token}' has an empty field or term"
            )));
        }
        clauses.push(RawClause {
            field: field.to_string(),
            term: term.to_string(),
        });
    }
    if clauses.is_empty() {
        return Err(SagittaError::query("raw query is empty"));
    }
    Ok(clauses)
}

fn value_tokens(value: &IndexValue) -> Vec<String> {
    match value.as_text() {
        Some(text) => text
            .split_whitespace()
            .map(|token| token.to_lowercase())
            .collect(),
        None => vec![value.to_string()],
    }
}

fn clause_matches(fields: &AHashMap<String, IndexValue>, clause: &RawClause) -> bool {
    let Some(value) = fields.get(&clause.field) else {
        return false;
    };
    // Derived exact-string fields match on the whole stored value; everything
    // else matches tokens case-insensitively.
    if FieldMapping::mapped_name(&clause.field) != clause.field {
        return value.to_string() == clause.term;
    }
    let term = clause.term.to_lowercase();
    value_tokens(value).contains(&term)
}

fn clause_frequency(fields: &AHashMap<String, IndexValue>, clause: &RawClause) -> f32 {
    let Some(value) = fields.get(&clause.field) else {
        return 0.0;
    };
    if FieldMapping::mapped_name(&clause.field) != clause.field {
        return if value.to_string() == clause.term { 1.0 } else { 0.0 };
    }
    let term = clause.term.to_lowercase();
    value_tokens(value)
        .iter()
        .filter(|token| **token == term)
        .count() as f32
}

/// Term-frequency scorer over one segment's documents.
struct SegmentScorer {
    docs: Vec<AHashMap<String, IndexValue>>,
    clauses: Arc<Vec<RawClause>>,
}

impl Scorer for SegmentScorer {
    fn score(&mut self, local_doc_id: u64) -> Result<f32> {
        let fields = self.docs.get(local_doc_id as usize).ok_or_else(|| {
            SagittaError::backend_msg(
                "rawQuery",
                format!("scorer positioned on unknown document {local_doc_id}"),
            )
        })?;
        Ok(self
            .clauses
            .iter()
            .map(|clause| clause_frequency(fields, clause))
            .sum())
    }
}

fn compare_values(left: Option<&IndexValue>, right: Option<&IndexValue>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (left, right) {
        (None, None) => Ordering::Equal,
        // Documents missing the order key sort last.
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => a.to_string().cmp(&b.to_string()),
        },
    }
}

/// An [`IndexProvider`] keeping all index data in process memory.
pub struct MemoryIndexProvider {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryIndexProvider {
    /// Create a provider with the default segment capacity.
    pub fn new() -> Self {
        Self::with_segment_capacity(DEFAULT_SEGMENT_CAPACITY)
    }

    /// Create a provider whose segments hold at most `segment_capacity`
    /// documents. Smaller segments mean more scan partitions.
    pub fn with_segment_capacity(segment_capacity: usize) -> Self {
        assert!(segment_capacity > 0, "segment capacity must be positive");
        MemoryIndexProvider {
            inner: Arc::new(RwLock::new(Inner {
                segment_capacity,
                stores: AHashMap::new(),
                closed: false,
            })),
        }
    }

    fn check_open(&self, operation: &str) -> Result<()> {
        if self.inner.read().closed {
            return Err(SagittaError::backend_msg(
                operation,
                "memory index provider is closed",
            ));
        }
        Ok(())
    }

    /// Downcast and validate a transaction handle we issued ourselves.
    fn own_transaction<'a>(
        &self,
        tx: &'a mut dyn IndexTransaction,
    ) -> Result<&'a mut MemoryTransaction> {
        let tx = tx
            .as_any_mut()
            .downcast_mut::<MemoryTransaction>()
            .ok_or_else(|| {
                SagittaError::transaction(
                    "transaction handle was not issued by this memory index provider",
                )
            })?;
        if !Arc::ptr_eq(&tx.inner, &self.inner) {
            return Err(SagittaError::transaction(
                "transaction handle belongs to a different memory index provider",
            ));
        }
        Ok(tx)
    }

    /// Resolve a logical entry to the physical fields it expands to.
    fn expand_entry(
        store: &str,
        key: &str,
        value: &IndexValue,
        information: &dyn KeyInformationRetriever,
    ) -> Vec<(String, IndexValue)> {
        let key_information = information.get(store, key);
        let mapping = FieldMapping::new(key, key_information.as_ref());
        let mut fields = vec![(mapping.field_key().to_string(), value.clone())];
        if let Some(dual) = mapping.dual_mapping() {
            fields.push((dual.field_key().to_string(), value.clone()));
        }
        fields
    }

    /// The physical field an exact or ordering predicate resolves to.
    fn physical_field(
        store: &str,
        key: &str,
        predicate: IndexPredicate,
        information: &dyn KeyInformationRetriever,
    ) -> String {
        let key_information = information.get(store, key);
        let mapping = FieldMapping::new(key, key_information.as_ref());
        if !predicate.is_text()
            && let Some(dual) = mapping.dual_mapping()
        {
            return dual.field_key().to_string();
        }
        mapping.field_key().to_string()
    }

    fn predicate_matches(
        fields: &AHashMap<String, IndexValue>,
        field: &str,
        predicate: IndexPredicate,
        expected: &IndexValue,
    ) -> bool {
        let Some(actual) = fields.get(field) else {
            return false;
        };
        match predicate {
            IndexPredicate::Eq => actual == expected,
            IndexPredicate::Neq => actual != expected,
            IndexPredicate::Lt | IndexPredicate::Lte | IndexPredicate::Gt | IndexPredicate::Gte => {
                let (Some(actual), Some(expected)) = (actual.as_f64(), expected.as_f64()) else {
                    return false;
                };
                match predicate {
                    IndexPredicate::Lt => actual < expected,
                    IndexPredicate::Lte => actual <= expected,
                    IndexPredicate::Gt => actual > expected,
                    _ => actual >= expected,
                }
            }
            IndexPredicate::TextContains => {
                let term = expected.to_string().to_lowercase();
                actual
                    .as_text()
                    .is_some_and(|text| text.split_whitespace().any(|t| t.to_lowercase() == term))
            }
            IndexPredicate::TextPrefix => {
                let prefix = expected.to_string().to_lowercase();
                actual.as_text().is_some_and(|text| {
                    text.split_whitespace()
                        .any(|t| t.to_lowercase().starts_with(&prefix))
                })
            }
        }
    }

    fn condition_matches(
        store: &str,
        fields: &AHashMap<String, IndexValue>,
        condition: &Condition,
        information: &dyn KeyInformationRetriever,
    ) -> bool {
        match condition {
            Condition::Predicate {
                key,
                predicate,
                value,
            } => {
                let field = Self::physical_field(store, key, *predicate, information);
                Self::predicate_matches(fields, &field, *predicate, value)
            }
            Condition::And(children) => children
                .iter()
                .all(|child| Self::condition_matches(store, fields, child, information)),
            Condition::Or(children) => children
                .iter()
                .any(|child| Self::condition_matches(store, fields, child, information)),
            Condition::Not(child) => {
                !Self::condition_matches(store, fields, child, information)
            }
        }
    }

    /// Scan a store's segments through a collector, offering matches.
    fn scan<M>(store_data: &StoreData, collector: &mut DocumentCollector, matches: M) -> Result<()>
    where
        M: Fn(&Document) -> bool,
    {
        let mut base = 0u64;
        for segment in &store_data.segments {
            collector.start_partition(base);
            for (ordinal, doc) in segment.docs.iter().enumerate() {
                if !doc.deleted && matches(doc) {
                    collector.offer(ordinal as u64)?;
                }
            }
            base += segment.docs.len() as u64;
        }
        Ok(())
    }

    fn scan_raw(
        store_data: &StoreData,
        clauses: &Arc<Vec<RawClause>>,
        collector: &mut DocumentCollector,
    ) -> Result<()> {
        let mut base = 0u64;
        for segment in &store_data.segments {
            collector.start_partition(base);
            if collector.needs_score() {
                collector.set_scorer(Box::new(SegmentScorer {
                    docs: segment.docs.iter().map(|doc| doc.fields.clone()).collect(),
                    clauses: Arc::clone(clauses),
                }));
            }
            for (ordinal, doc) in segment.docs.iter().enumerate() {
                let matched = !doc.deleted
                    && clauses.iter().all(|clause| clause_matches(&doc.fields, clause));
                if matched {
                    collector.offer(ordinal as u64)?;
                }
            }
            base += segment.docs.len() as u64;
        }
        Ok(())
    }
}

impl Default for MemoryIndexProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexProvider for MemoryIndexProvider {
    fn register(
        &self,
        store: &str,
        key: &str,
        information: &KeyInformation,
        tx: &mut dyn IndexTransaction,
    ) -> Result<()> {
        self.check_open("register")?;
        self.own_transaction(tx)?;
        FieldMapping::validate_logical_key(key)?;

        let mut inner = self.inner.write();
        let store_data = inner.stores.entry(store.to_string()).or_default();
        match store_data.registered.get(key) {
            Some(existing) if existing == information => Ok(()),
            Some(_) => Err(SagittaError::configuration(format!(
                "key '{key}' in store '{store}' is already registered with different information"
            ))),
            None => {
                store_data
                    .registered
                    .insert(key.to_string(), *information);
                debug!(store, key, "registered index key");
                Ok(())
            }
        }
    }

    fn mutate(
        &self,
        mutations: MutationsByStore,
        information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<()> {
        self.check_open("mutate")?;
        let tx = self.own_transaction(tx)?;

        let mut staged = 0usize;
        for (store, docs) in mutations {
            for (doc_id, mutation) in docs {
                let mut additions = Vec::new();
                let mut deletions = Vec::new();
                for entry in mutation.additions() {
                    additions.extend(Self::expand_entry(
                        &store,
                        &entry.field,
                        &entry.value,
                        information,
                    ));
                }
                for entry in mutation.deletions() {
                    for (field, _) in
                        Self::expand_entry(&store, &entry.field, &entry.value, information)
                    {
                        deletions.push(field);
                    }
                }
                staged += 1;
                tx.pending.push(PendingOp::Mutate {
                    store: store.clone(),
                    doc_id,
                    additions,
                    deletions,
                    is_deleted: mutation.is_deleted(),
                });
            }
        }
        debug!(staged, "staged index mutations");
        Ok(())
    }

    fn restore(
        &self,
        documents: DocumentsByStore,
        information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<()> {
        self.check_open("restore")?;
        let tx = self.own_transaction(tx)?;

        let mut staged = 0usize;
        for (store, docs) in documents {
            for (doc_id, entries) in docs {
                let fields = if entries.is_empty() {
                    None
                } else {
                    let mut fields = Vec::new();
                    for entry in &entries {
                        fields.extend(Self::expand_entry(
                            &store,
                            &entry.field,
                            &entry.value,
                            information,
                        ));
                    }
                    Some(fields)
                };
                staged += 1;
                tx.pending.push(PendingOp::Restore {
                    store: store.clone(),
                    doc_id,
                    fields,
                });
            }
        }
        debug!(staged, "staged index restores");
        Ok(())
    }

    fn query(
        &self,
        query: &IndexQuery,
        information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<DocIdStream> {
        self.check_open("query")?;
        self.own_transaction(tx)?;

        let inner = self.inner.read();
        let Some(store_data) = inner.stores.get(&query.store) else {
            return Ok(Box::new(std::iter::empty()));
        };

        // With a requested ordering every match must be seen before sorting,
        // so the cap is applied after the sort instead of in the collector.
        let capacity = if query.orders.is_empty() {
            query.limit.unwrap_or(usize::MAX)
        } else {
            usize::MAX
        };
        let mut collector = DocumentCollector::new(capacity, false);
        Self::scan(store_data, &mut collector, |doc| {
            Self::condition_matches(&query.store, &doc.fields, &query.condition, information)
        })?;

        let hits = collector.into_hits();
        let mut keys: Vec<String> = hits
            .docs
            .iter()
            .filter_map(|global| store_data.key_for_global(*global))
            .map(str::to_string)
            .collect();

        if !query.orders.is_empty() {
            let mut sortable: Vec<(String, Vec<Option<IndexValue>>)> = keys
                .into_iter()
                .map(|key| {
                    let sort_values = match store_data.locations.get(&key) {
                        Some(location) => {
                            let fields =
                                &store_data.segments[location.segment].docs[location.ordinal].fields;
                            query
                                .orders
                                .iter()
                                .map(|order| fields.get(&order.key).cloned())
                                .collect()
                        }
                        None => vec![None; query.orders.len()],
                    };
                    (key, sort_values)
                })
                .collect();
            sortable.sort_by(|(_, left), (_, right)| {
                for (index, order) in query.orders.iter().enumerate() {
                    let ordering = compare_values(left[index].as_ref(), right[index].as_ref());
                    let ordering = if order.ascending {
                        ordering
                    } else {
                        ordering.reverse()
                    };
                    if !ordering.is_eq() {
                        return ordering;
                    }
                }
                std::cmp::Ordering::Equal
            });
            keys = sortable.into_iter().map(|(key, _)| key).collect();
            if let Some(limit) = query.limit {
                keys.truncate(limit);
            }
        }

        Ok(Box::new(keys.into_iter()))
    }

    fn raw_query(
        &self,
        query: &RawQuery,
        _information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<RawHitStream> {
        self.check_open("rawQuery")?;
        self.own_transaction(tx)?;
        let clauses = Arc::new(parse_raw_query(&query.query)?);

        let inner = self.inner.read();
        let Some(store_data) = inner.stores.get(&query.store) else {
            return Ok(Box::new(std::iter::empty()));
        };

        let capacity = query
            .limit
            .map(|limit| limit.saturating_add(query.offset))
            .unwrap_or(usize::MAX);
        let mut collector = DocumentCollector::new(capacity, true);
        Self::scan_raw(store_data, &clauses, &mut collector)?;

        let hits = collector.into_hits();
        let raw_hits: Vec<RawHit> = hits
            .docs
            .iter()
            .zip(hits.scores.iter())
            .skip(query.offset)
            .filter_map(|(global, score)| {
                store_data
                    .key_for_global(*global)
                    .map(|key| RawHit::new(key, *score))
            })
            .collect();

        Ok(Box::new(raw_hits.into_iter()))
    }

    fn totals(
        &self,
        query: &RawQuery,
        _information: &dyn KeyInformationRetriever,
        tx: &mut dyn IndexTransaction,
    ) -> Result<u64> {
        self.check_open("totals")?;
        self.own_transaction(tx)?;
        let clauses = Arc::new(parse_raw_query(&query.query)?);

        let inner = self.inner.read();
        let Some(store_data) = inner.stores.get(&query.store) else {
            return Ok(0);
        };

        // A zero-capacity collector counts matches without materializing them.
        let mut collector = DocumentCollector::new(0, false);
        Self::scan_raw(store_data, &clauses, &mut collector)?;
        Ok(collector.seen())
    }

    fn begin_transaction(&self, config: TransactionConfig) -> Result<Box<dyn IndexTransaction>> {
        self.check_open("beginTransaction")?;
        Ok(Box::new(MemoryTransaction {
            inner: Arc::clone(&self.inner),
            config,
            pending: Vec::new(),
        }))
    }

    fn close(&self) -> Result<()> {
        let mut inner = self.inner.write();
        inner.closed = true;
        info!("closed memory index provider");
        Ok(())
    }

    fn clear_storage(&self) -> Result<()> {
        self.check_open("clearStorage")?;
        let mut inner = self.inner.write();
        let stores = inner.stores.len();
        inner.stores.clear();
        info!(stores, "cleared memory index storage");
        Ok(())
    }

    fn exists(&self) -> Result<bool> {
        self.check_open("exists")?;
        Ok(!self.inner.read().stores.is_empty())
    }

    fn supports(&self, information: &KeyInformation) -> bool {
        match information.mapping() {
            IndexMapping::Default => true,
            IndexMapping::Text | IndexMapping::ExactString | IndexMapping::TextString => {
                information.data_type().is_string_like()
            }
        }
    }

    fn supports_predicate(
        &self,
        information: &KeyInformation,
        predicate: IndexPredicate,
    ) -> bool {
        if !self.supports(information) {
            return false;
        }
        match information.data_type() {
            IndexDataType::Text => match information.mapping() {
                // Untokenized strings answer exact predicates only.
                IndexMapping::ExactString => {
                    matches!(predicate, IndexPredicate::Eq | IndexPredicate::Neq)
                }
                // Tokenized text answers the full-text predicates only.
                IndexMapping::Text | IndexMapping::Default => predicate.is_text(),
                IndexMapping::TextString => {
                    predicate.is_text()
                        || matches!(predicate, IndexPredicate::Eq | IndexPredicate::Neq)
                }
            },
            IndexDataType::Long | IndexDataType::Double => {
                matches!(predicate, IndexPredicate::Eq | IndexPredicate::Neq)
                    || predicate.is_ordering()
            }
            IndexDataType::Boolean => {
                matches!(predicate, IndexPredicate::Eq | IndexPredicate::Neq)
            }
        }
    }

    fn map_key_to_field(&self, key: &str, _information: &KeyInformation) -> String {
        // Physical names equal logical keys here; derived exact-string fields
        // are named through the dual mapping at mutation and query time.
        key.to_string()
    }

    fn features(&self) -> IndexFeatures {
        IndexFeatures::builder()
            .mapping(IndexMapping::Default)
            .mapping(IndexMapping::Text)
            .mapping(IndexMapping::ExactString)
            .mapping(IndexMapping::TextString)
            .data_type(IndexDataType::Text)
            .data_type(IndexDataType::Long)
            .data_type(IndexDataType::Double)
            .data_type(IndexDataType::Boolean)
            .order()
            .not_queries()
            .raw_queries()
            .build()
    }
}
