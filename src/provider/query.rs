//! Query shapes accepted by index providers.
//!
//! Only the shape of the contract lives here. Predicate semantics beyond this
//! surface (analyzers, boosting, geo, …) are backend concerns.

use serde::{Deserialize, Serialize};

use crate::provider::entry::IndexValue;

/// Comparison and text predicates usable in typed query conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexPredicate {
    /// Exact equality.
    Eq,
    /// Exact inequality.
    Neq,
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Full-text match of a token.
    TextContains,
    /// Full-text token prefix match.
    TextPrefix,
}

impl IndexPredicate {
    /// True for the ordering comparisons (`Lt`/`Lte`/`Gt`/`Gte`).
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            IndexPredicate::Lt | IndexPredicate::Lte | IndexPredicate::Gt | IndexPredicate::Gte
        )
    }

    /// True for the full-text predicates.
    pub fn is_text(&self) -> bool {
        matches!(self, IndexPredicate::TextContains | IndexPredicate::TextPrefix)
    }
}

/// A predicate tree over logical attribute keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// A single predicate on one key.
    Predicate {
        /// Logical attribute key.
        key: String,
        /// Predicate to apply.
        predicate: IndexPredicate,
        /// Comparison value.
        value: IndexValue,
    },
    /// All sub-conditions must hold.
    And(Vec<Condition>),
    /// At least one sub-condition must hold.
    Or(Vec<Condition>),
    /// The sub-condition must not hold.
    Not(Box<Condition>),
}

impl Condition {
    /// A single-predicate condition.
    pub fn predicate<K, V>(key: K, predicate: IndexPredicate, value: V) -> Self
    where
        K: Into<String>,
        V: Into<IndexValue>,
    {
        Condition::Predicate {
            key: key.into(),
            predicate,
            value: value.into(),
        }
    }

    /// Logical keys referenced anywhere in this condition tree.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut Vec<&'a str>) {
        match self {
            Condition::Predicate { key, .. } => keys.push(key),
            Condition::And(children) | Condition::Or(children) => {
                for child in children {
                    child.collect_keys(keys);
                }
            }
            Condition::Not(child) => child.collect_keys(keys),
        }
    }
}

/// Requested ordering of typed query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOrder {
    /// Key to order by.
    pub key: String,
    /// Ascending when true, descending otherwise.
    pub ascending: bool,
}

impl IndexOrder {
    /// Ascending order on `key`.
    pub fn asc<K: Into<String>>(key: K) -> Self {
        IndexOrder {
            key: key.into(),
            ascending: true,
        }
    }

    /// Descending order on `key`.
    pub fn desc<K: Into<String>>(key: K) -> Self {
        IndexOrder {
            key: key.into(),
            ascending: false,
        }
    }
}

/// A typed query against one index store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuery {
    /// Store to query.
    pub store: String,
    /// Predicate tree to satisfy.
    pub condition: Condition,
    /// Requested result ordering; backend native order when empty.
    pub orders: Vec<IndexOrder>,
    /// Maximum number of results; unbounded when `None`.
    pub limit: Option<usize>,
}

impl IndexQuery {
    /// A query over `store` matching `condition`, unordered and unbounded.
    pub fn new<S: Into<String>>(store: S, condition: Condition) -> Self {
        IndexQuery {
            store: store.into(),
            condition,
            orders: Vec::new(),
            limit: None,
        }
    }

    /// Add a result ordering.
    pub fn order_by(mut self, order: IndexOrder) -> Self {
        self.orders.push(order);
        self
    }

    /// Cap the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A query in backend-native syntax against one index store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuery {
    /// Store to query.
    pub store: String,
    /// Backend-native query string.
    pub query: String,
    /// Maximum number of results; unbounded when `None`.
    pub limit: Option<usize>,
    /// Number of leading results to skip.
    pub offset: usize,
}

impl RawQuery {
    /// A raw query over `store`.
    pub fn new<S, Q>(store: S, query: Q) -> Self
    where
        S: Into<String>,
        Q: Into<String>,
    {
        RawQuery {
            store: store.into(),
            query: query.into(),
            limit: None,
            offset: 0,
        }
    }

    /// Cap the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` results.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// One scored raw-query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    /// Matched document id.
    pub doc_id: String,
    /// Backend relevance score.
    pub score: f32,
}

impl RawHit {
    /// Create a new hit.
    pub fn new<D: Into<String>>(doc_id: D, score: f32) -> Self {
        RawHit {
            doc_id: doc_id.into(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_classification() {
        assert!(IndexPredicate::Lt.is_ordering());
        assert!(IndexPredicate::Gte.is_ordering());
        assert!(!IndexPredicate::Eq.is_ordering());

        assert!(IndexPredicate::TextContains.is_text());
        assert!(IndexPredicate::TextPrefix.is_text());
        assert!(!IndexPredicate::Neq.is_text());
    }

    #[test]
    fn test_condition_key_collection() {
        let condition = Condition::And(vec![
            Condition::predicate("name", IndexPredicate::TextContains, "hello"),
            Condition::Or(vec![
                Condition::predicate("age", IndexPredicate::Gte, 21i64),
                Condition::Not(Box::new(Condition::predicate(
                    "active",
                    IndexPredicate::Eq,
                    true,
                ))),
            ]),
        ]);

        assert_eq!(condition.keys(), vec!["name", "age", "active"]);
    }

    #[test]
    fn test_query_builders() {
        let query = IndexQuery::new(
            "vertex",
            Condition::predicate("name", IndexPredicate::Eq, "saturn"),
        )
        .order_by(IndexOrder::desc("age"))
        .with_limit(10);

        assert_eq!(query.store, "vertex");
        assert_eq!(query.orders.len(), 1);
        assert!(!query.orders[0].ascending);
        assert_eq!(query.limit, Some(10));

        let raw = RawQuery::new("vertex", "name:saturn").with_limit(5).with_offset(2);
        assert_eq!(raw.limit, Some(5));
        assert_eq!(raw.offset, 2);
    }
}
