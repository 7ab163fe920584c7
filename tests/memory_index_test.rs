//! Integration tests for the in-memory index provider.

use std::collections::HashMap;

use sagitta::error::Result;
use sagitta::fulltext::MemoryIndexProvider;
use sagitta::provider::{
    Condition, IndexEntry, IndexMutation, IndexOrder, IndexPredicate, IndexProvider, IndexQuery,
    RawQuery, TransactionConfig,
};
use sagitta::schema::{
    IndexDataType, IndexMapping, KeyInformation, KeyInformationRetriever, StaticKeyInformation,
};

const STORE: &str = "vertex";

fn schema() -> StaticKeyInformation {
    StaticKeyInformation::new()
        .define(
            STORE,
            "name",
            KeyInformation::with_mapping(IndexDataType::Text, IndexMapping::TextString),
        )
        .define(
            STORE,
            "description",
            KeyInformation::with_mapping(IndexDataType::Text, IndexMapping::Text),
        )
        .define(STORE, "age", KeyInformation::new(IndexDataType::Long))
        .define(STORE, "active", KeyInformation::new(IndexDataType::Boolean))
}

fn doc_mutation(name: &str, description: &str, age: i64, active: bool) -> IndexMutation {
    IndexMutation::with_flags(true, false)
        .unwrap()
        .add(IndexEntry::new("name", name))
        .add(IndexEntry::new("description", description))
        .add(IndexEntry::new("age", age))
        .add(IndexEntry::new("active", active))
}

/// Populate the store with a small pantheon and commit.
fn populate(provider: &MemoryIndexProvider, retriever: &dyn KeyInformationRetriever) -> Result<()> {
    let mut docs = HashMap::new();
    docs.insert(
        "saturn".to_string(),
        doc_mutation("saturn of titans", "titan god of time", 10_000, false),
    );
    docs.insert(
        "hercules".to_string(),
        doc_mutation("hercules of thebes", "demigod hero slaying monsters", 30, true),
    );
    docs.insert(
        "neptune".to_string(),
        doc_mutation("neptune of the sea", "god of the sea and storms", 4_500, true),
    );
    let mut mutations = HashMap::new();
    mutations.insert(STORE.to_string(), docs);

    let mut tx = provider.begin_transaction(TransactionConfig::new())?;
    provider.mutate(mutations, retriever, tx.as_mut())?;
    tx.commit()
}

#[test]
fn test_mutations_visible_only_after_commit() -> Result<()> {
    let provider = MemoryIndexProvider::new();
    let retriever = schema();

    let mut docs = HashMap::new();
    docs.insert(
        "saturn".to_string(),
        doc_mutation("saturn of titans", "titan god of time", 10_000, false),
    );
    let mut mutations = HashMap::new();
    mutations.insert(STORE.to_string(), docs);

    let mut tx = provider.begin_transaction(TransactionConfig::new())?;
    provider.mutate(mutations, &retriever, tx.as_mut())?;

    let query = IndexQuery::new(
        STORE,
        Condition::predicate("description", IndexPredicate::TextContains, "titan"),
    );
    let before: Vec<String> = provider.query(&query, &retriever, tx.as_mut())?.collect();
    assert!(before.is_empty());

    tx.commit()?;
    let after: Vec<String> = provider.query(&query, &retriever, tx.as_mut())?.collect();
    assert_eq!(after, vec!["saturn"]);
    Ok(())
}

#[test]
fn test_rollback_discards_buffered_mutations() -> Result<()> {
    let provider = MemoryIndexProvider::new();
    let retriever = schema();

    let mut docs = HashMap::new();
    docs.insert(
        "pluto".to_string(),
        doc_mutation("pluto of the underworld", "god of the dead", 4_000, true),
    );
    let mut mutations = HashMap::new();
    mutations.insert(STORE.to_string(), docs);

    let mut tx = provider.begin_transaction(TransactionConfig::new())?;
    provider.mutate(mutations, &retriever, tx.as_mut())?;
    tx.rollback()?;
    tx.commit()?;

    let query = IndexQuery::new(
        STORE,
        Condition::predicate("description", IndexPredicate::TextContains, "dead"),
    );
    let matches: Vec<String> = provider.query(&query, &retriever, tx.as_mut())?.collect();
    assert!(matches.is_empty());
    Ok(())
}

#[test]
fn test_dual_mapped_attribute_is_searchable_both_ways() -> Result<()> {
    let provider = MemoryIndexProvider::new();
    let retriever = schema();
    populate(&provider, &retriever)?;
    let mut tx = provider.begin_transaction(TransactionConfig::new())?;

    // Full-text: token match inside the name.
    let contains = IndexQuery::new(
        STORE,
        Condition::predicate("name", IndexPredicate::TextContains, "thebes"),
    );
    let matches: Vec<String> = provider.query(&contains, &retriever, tx.as_mut())?.collect();
    assert_eq!(matches, vec!["hercules"]);

    // Exact string: the whole value, matched against the derived field.
    let exact = IndexQuery::new(
        STORE,
        Condition::predicate("name", IndexPredicate::Eq, "hercules of thebes"),
    );
    let matches: Vec<String> = provider.query(&exact, &retriever, tx.as_mut())?.collect();
    assert_eq!(matches, vec!["hercules"]);

    // A token is not the whole value.
    let partial = IndexQuery::new(
        STORE,
        Condition::predicate("name", IndexPredicate::Eq, "hercules"),
    );
    let matches: Vec<String> = provider.query(&partial, &retriever, tx.as_mut())?.collect();
    assert!(matches.is_empty());
    Ok(())
}

#[test]
fn test_numeric_boolean_and_composite_conditions() -> Result<()> {
    let provider = MemoryIndexProvider::new();
    let retriever = schema();
    populate(&provider, &retriever)?;
    let mut tx = provider.begin_transaction(TransactionConfig::new())?;

    let old_and_inactive = IndexQuery::new(
        STORE,
        Condition::And(vec![
            Condition::predicate("age", IndexPredicate::Gte, 5_000i64),
            Condition::predicate("active", IndexPredicate::Eq, false),
        ]),
    );
    let matches: Vec<String> = provider
        .query(&old_and_inactive, &retriever, tx.as_mut())?
        .collect();
    assert_eq!(matches, vec!["saturn"]);

    let not_sea = IndexQuery::new(
        STORE,
        Condition::Not(Box::new(Condition::predicate(
            "description",
            IndexPredicate::TextContains,
            "sea",
        ))),
    );
    let mut matches: Vec<String> = provider.query(&not_sea, &retriever, tx.as_mut())?.collect();
    matches.sort();
    assert_eq!(matches, vec!["hercules", "saturn"]);

    let young_or_hero = IndexQuery::new(
        STORE,
        Condition::Or(vec![
            Condition::predicate("age", IndexPredicate::Lt, 100i64),
            Condition::predicate("description", IndexPredicate::TextPrefix, "god"),
        ]),
    );
    let mut matches: Vec<String> = provider
        .query(&young_or_hero, &retriever, tx.as_mut())?
        .collect();
    matches.sort();
    assert_eq!(matches, vec!["hercules", "neptune", "saturn"]);
    Ok(())
}

#[test]
fn test_query_ordering_and_limit() -> Result<()> {
    let provider = MemoryIndexProvider::new();
    let retriever = schema();
    populate(&provider, &retriever)?;
    let mut tx = provider.begin_transaction(TransactionConfig::new())?;

    let all = Condition::predicate("age", IndexPredicate::Gt, 0i64);
    let by_age_desc = IndexQuery::new(STORE, all.clone()).order_by(IndexOrder::desc("age"));
    let matches: Vec<String> = provider
        .query(&by_age_desc, &retriever, tx.as_mut())?
        .collect();
    assert_eq!(matches, vec!["saturn", "neptune", "hercules"]);

    let top_two = IndexQuery::new(STORE, all)
        .order_by(IndexOrder::asc("age"))
        .with_limit(2);
    let matches: Vec<String> = provider.query(&top_two, &retriever, tx.as_mut())?.collect();
    assert_eq!(matches, vec!["hercules", "neptune"]);
    Ok(())
}

#[test]
fn test_raw_query_scoring_offset_and_totals() -> Result<()> {
    let provider = MemoryIndexProvider::new();
    let retriever = schema();
    populate(&provider, &retriever)?;
    let mut tx = provider.begin_transaction(TransactionConfig::new())?;

    let query = RawQuery::new(STORE, "description:god");
    let hits: Vec<_> = provider.raw_query(&query, &retriever, tx.as_mut())?.collect();
    assert_eq!(hits.len(), 2);
    for hit in &hits {
        assert!(hit.score > 0.0, "term-frequency score expected for {hit:?}");
    }

    // Totals agree with an unbounded enumeration of the same query.
    assert_eq!(provider.totals(&query, &retriever, tx.as_mut())?, 2);

    // Limit truncates the enumeration but never the count.
    let limited = query.clone().with_limit(1);
    let hits: Vec<_> = provider
        .raw_query(&limited, &retriever, tx.as_mut())?
        .collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(provider.totals(&limited, &retriever, tx.as_mut())?, 2);

    // Offset skips leading hits.
    let offset = query.clone().with_offset(1);
    let offset_hits: Vec<_> = provider
        .raw_query(&offset, &retriever, tx.as_mut())?
        .collect();
    assert_eq!(offset_hits.len(), 1);

    // Multi-clause queries require every clause to match.
    let narrowed = RawQuery::new(STORE, "description:god description:storms");
    let hits: Vec<_> = provider
        .raw_query(&narrowed, &retriever, tx.as_mut())?
        .collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].doc_id, "neptune");

    // Malformed syntax is a query error.
    let malformed = RawQuery::new(STORE, "description");
    assert!(provider.raw_query(&malformed, &retriever, tx.as_mut()).is_err());
    Ok(())
}

#[test]
fn test_scan_spans_segments() -> Result<()> {
    let provider = MemoryIndexProvider::with_segment_capacity(2);
    let retriever = StaticKeyInformation::new().define(
        STORE,
        "description",
        KeyInformation::with_mapping(IndexDataType::Text, IndexMapping::Text),
    );

    let mut docs = HashMap::new();
    for index in 0..7 {
        let description = if index % 2 == 0 { "even doc" } else { "odd doc" };
        docs.insert(
            format!("doc{index}"),
            IndexMutation::with_flags(true, false)
                .unwrap()
                .add(IndexEntry::new("description", description)),
        );
    }
    let mut mutations = HashMap::new();
    mutations.insert(STORE.to_string(), docs);

    let mut tx = provider.begin_transaction(TransactionConfig::new())?;
    provider.mutate(mutations, &retriever, tx.as_mut())?;
    tx.commit()?;

    let query = IndexQuery::new(
        STORE,
        Condition::predicate("description", IndexPredicate::TextContains, "even"),
    );
    let mut matches: Vec<String> = provider.query(&query, &retriever, tx.as_mut())?.collect();
    matches.sort();
    assert_eq!(matches, vec!["doc0", "doc2", "doc4", "doc6"]);

    // Totals count across every segment as well.
    let raw = RawQuery::new(STORE, "description:doc");
    assert_eq!(provider.totals(&raw, &retriever, tx.as_mut())?, 7);
    Ok(())
}

#[test]
fn test_field_deletion_and_document_removal() -> Result<()> {
    let provider = MemoryIndexProvider::new();
    let retriever = schema();
    populate(&provider, &retriever)?;
    let mut tx = provider.begin_transaction(TransactionConfig::new())?;

    // Drop one field from hercules and remove saturn entirely.
    let mut docs = HashMap::new();
    docs.insert(
        "hercules".to_string(),
        IndexMutation::new().delete(IndexEntry::new("description", "")),
    );
    docs.insert(
        "saturn".to_string(),
        IndexMutation::with_flags(false, true).unwrap(),
    );
    let mut mutations = HashMap::new();
    mutations.insert(STORE.to_string(), docs);
    provider.mutate(mutations, &retriever, tx.as_mut())?;
    tx.commit()?;

    let hero_query = IndexQuery::new(
        STORE,
        Condition::predicate("description", IndexPredicate::TextContains, "hero"),
    );
    let matches: Vec<String> = provider.query(&hero_query, &retriever, tx.as_mut())?.collect();
    assert!(matches.is_empty());

    // The rest of hercules is still indexed.
    let name_query = IndexQuery::new(
        STORE,
        Condition::predicate("name", IndexPredicate::TextContains, "hercules"),
    );
    let matches: Vec<String> = provider.query(&name_query, &retriever, tx.as_mut())?.collect();
    assert_eq!(matches, vec!["hercules"]);

    let titan_query = IndexQuery::new(
        STORE,
        Condition::predicate("description", IndexPredicate::TextContains, "titan"),
    );
    let matches: Vec<String> = provider.query(&titan_query, &retriever, tx.as_mut())?.collect();
    assert!(matches.is_empty());
    Ok(())
}

#[test]
fn test_restore_replaces_documents_wholesale() -> Result<()> {
    let provider = MemoryIndexProvider::new();
    let retriever = schema();
    populate(&provider, &retriever)?;
    let mut tx = provider.begin_transaction(TransactionConfig::new())?;

    let mut docs = HashMap::new();
    // Saturn gets a fresh snapshot with only a name; neptune disappears.
    docs.insert(
        "saturn".to_string(),
        vec![IndexEntry::new("name", "saturn reborn")],
    );
    docs.insert("neptune".to_string(), Vec::new());
    let mut documents = HashMap::new();
    documents.insert(STORE.to_string(), docs);
    provider.restore(documents, &retriever, tx.as_mut())?;
    tx.commit()?;

    let titan_query = IndexQuery::new(
        STORE,
        Condition::predicate("description", IndexPredicate::TextContains, "titan"),
    );
    let matches: Vec<String> = provider.query(&titan_query, &retriever, tx.as_mut())?.collect();
    assert!(matches.is_empty(), "old saturn fields must be gone");

    let reborn_query = IndexQuery::new(
        STORE,
        Condition::predicate("name", IndexPredicate::TextContains, "reborn"),
    );
    let matches: Vec<String> = provider.query(&reborn_query, &retriever, tx.as_mut())?.collect();
    assert_eq!(matches, vec!["saturn"]);

    let sea_query = IndexQuery::new(
        STORE,
        Condition::predicate("description", IndexPredicate::TextContains, "sea"),
    );
    let matches: Vec<String> = provider.query(&sea_query, &retriever, tx.as_mut())?.collect();
    assert!(matches.is_empty(), "restored-empty neptune must be gone");
    Ok(())
}

#[test]
fn test_register_is_idempotent_and_validated() -> Result<()> {
    let provider = MemoryIndexProvider::new();
    let information = KeyInformation::with_mapping(IndexDataType::Text, IndexMapping::TextString);
    let mut tx = provider.begin_transaction(TransactionConfig::new())?;

    provider.register(STORE, "name", &information, tx.as_mut())?;
    // Same information again is a no-op.
    provider.register(STORE, "name", &information, tx.as_mut())?;

    // Conflicting re-registration is refused.
    let conflicting = KeyInformation::new(IndexDataType::Long);
    assert!(provider.register(STORE, "name", &conflicting, tx.as_mut()).is_err());

    // Keys colliding with the reserved suffix are refused outright.
    assert!(provider.register(STORE, "name_____s", &information, tx.as_mut()).is_err());
    Ok(())
}

#[test]
fn test_foreign_transaction_handle_is_rejected() -> Result<()> {
    let provider = MemoryIndexProvider::new();
    let other = MemoryIndexProvider::new();
    let retriever = schema();

    let mut foreign_tx = other.begin_transaction(TransactionConfig::new())?;
    let outcome = provider.mutate(HashMap::new(), &retriever, foreign_tx.as_mut());
    assert!(outcome.is_err());
    Ok(())
}

#[test]
fn test_lifecycle_clear_exists_close() -> Result<()> {
    let provider = MemoryIndexProvider::new();
    let retriever = schema();

    assert!(!provider.exists()?);
    populate(&provider, &retriever)?;
    assert!(provider.exists()?);

    provider.clear_storage()?;
    assert!(!provider.exists()?);

    provider.close()?;
    assert!(provider.exists().is_err());
    assert!(provider.begin_transaction(TransactionConfig::new()).is_err());
    Ok(())
}

#[test]
fn test_key_information_delivered_as_json() -> Result<()> {
    let provider = MemoryIndexProvider::new();

    // Schema metadata as the management layer would ship it.
    let information: KeyInformation =
        serde_json::from_str(r#"{"data_type":"text","mapping":"text_string"}"#)?;
    let retriever = StaticKeyInformation::new().define(STORE, "title", information);

    let mut docs = HashMap::new();
    docs.insert(
        "book1".to_string(),
        IndexMutation::with_flags(true, false)
            .unwrap()
            .add(IndexEntry::new("title", "the odyssey")),
    );
    let mut mutations = HashMap::new();
    mutations.insert(STORE.to_string(), docs);

    let mut tx = provider.begin_transaction(TransactionConfig::new())?;
    provider.mutate(mutations, &retriever, tx.as_mut())?;
    tx.commit()?;

    let exact = IndexQuery::new(
        STORE,
        Condition::predicate("title", IndexPredicate::Eq, "the odyssey"),
    );
    let matches: Vec<String> = provider.query(&exact, &retriever, tx.as_mut())?.collect();
    assert_eq!(matches, vec!["book1"]);
    Ok(())
}
