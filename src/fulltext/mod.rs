//! Full-text backend building blocks.
//!
//! Backends that index tokenized text share three concerns: resolving logical
//! attribute keys to physical field names (including the dual full-text/exact
//! expansion), collecting a bounded number of scan matches across index
//! partitions, and an [`IndexProvider`](crate::provider::IndexProvider)
//! implementation tying them together. The in-memory provider here doubles as
//! the reference backend for tests.

pub mod collector;
pub mod field_mapping;
pub mod memory;

pub use collector::{CollectedHits, DocumentCollector, Scorer};
pub use field_mapping::FieldMapping;
pub use memory::MemoryIndexProvider;
