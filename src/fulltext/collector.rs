//! Bounded collection of scan matches across index partitions.

use crate::error::Result;

/// Computes the relevance score of a partition-local document.
///
/// Attached to a [`DocumentCollector`] per partition by the scanning backend.
/// Scoring may touch backend state and therefore may fail with a backend
/// error.
pub trait Scorer {
    /// Relevance score of the document with the given partition-local id.
    fn score(&mut self, local_doc_id: u64) -> Result<f32>;
}

impl<F> Scorer for F
where
    F: FnMut(u64) -> Result<f32>,
{
    fn score(&mut self, local_doc_id: u64) -> Result<f32> {
        self(local_doc_id)
    }
}

// Matches the typical page of results; no point reserving a huge buffer for
// queries that rarely fill it.
const EXPECTED_ELEMENTS: usize = 10;

/// A bounded accumulator of `(document id, score)` pairs.
///
/// The scanning backend announces each partition with
/// [`start_partition`](DocumentCollector::start_partition) and then offers
/// every match. The first `capacity` offers are kept, in encounter order;
/// later offers are dropped but still counted, so truncation stays observable
/// through [`seen`](DocumentCollector::seen) versus
/// [`len`](DocumentCollector::len). Partition-local ids are translated to
/// global ids with the partition's base offset before storage.
///
/// One collector serves exactly one query execution on one scanning thread;
/// [`into_hits`](DocumentCollector::into_hits) finalizes it for reading.
pub struct DocumentCollector {
    docs: Vec<u64>,
    scores: Vec<f32>,
    capacity: usize,
    needs_score: bool,
    seen: u64,
    base: u64,
    scorer: Option<Box<dyn Scorer>>,
}

// Manual Debug implementation to handle Box<dyn Scorer>
impl std::fmt::Debug for DocumentCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCollector")
            .field("capacity", &self.capacity)
            .field("needs_score", &self.needs_score)
            .field("seen", &self.seen)
            .field("base", &self.base)
            .field("kept", &self.docs.len())
            .field("has_scorer", &self.scorer.is_some())
            .finish()
    }
}

/// The finalized output of a [`DocumentCollector`].
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedHits {
    /// Global document ids, in encounter order.
    pub docs: Vec<u64>,
    /// Scores parallel to `docs`; all zero when scoring was disabled.
    pub scores: Vec<f32>,
    /// Total number of candidates offered, including dropped ones.
    pub seen: u64,
}

impl CollectedHits {
    /// True when more candidates were offered than kept.
    pub fn is_truncated(&self) -> bool {
        self.seen > self.docs.len() as u64
    }
}

impl DocumentCollector {
    /// A collector keeping at most `capacity` hits.
    ///
    /// When `needs_score` is false no scoring computation is ever invoked and
    /// every recorded score is 0.0; when it is true a [`Scorer`] must be
    /// attached before the first offer.
    pub fn new(capacity: usize, needs_score: bool) -> Self {
        let expected_elements = capacity.min(EXPECTED_ELEMENTS);
        DocumentCollector {
            docs: Vec::with_capacity(expected_elements),
            scores: Vec::with_capacity(expected_elements),
            capacity,
            needs_score,
            seen: 0,
            base: 0,
            scorer: None,
        }
    }

    /// Whether scoring was requested for this collection.
    pub fn needs_score(&self) -> bool {
        self.needs_score
    }

    /// Attach or replace the scorer for the current partition.
    pub fn set_scorer(&mut self, scorer: Box<dyn Scorer>) {
        self.scorer = Some(scorer);
    }

    /// Begin a new partition whose local document ids start at `base` in the
    /// global id space. Called before any offer of that partition; entries
    /// already recorded are unaffected.
    pub fn start_partition(&mut self, base: u64) {
        self.base = base;
    }

    /// Offer one partition-local match.
    ///
    /// Counts the candidate, and keeps it unless the collector is already at
    /// capacity. The score is computed only when scoring was requested.
    ///
    /// # Panics
    ///
    /// Panics when scoring was requested but no scorer is attached; silently
    /// recording 0.0 would corrupt relevance ordering downstream.
    pub fn offer(&mut self, local_doc_id: u64) -> Result<()> {
        let kept = self.seen < self.capacity as u64;
        self.seen += 1;
        if !kept {
            return Ok(());
        }

        let mut score = 0.0;
        if self.needs_score {
            let scorer = self
                .scorer
                .as_mut()
                .expect("scoring requested but no scorer attached to collector");
            score = scorer.score(local_doc_id)?;
        }
        self.docs.push(self.base + local_doc_id);
        self.scores.push(score);
        Ok(())
    }

    /// Total number of candidates offered so far.
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Number of hits currently kept. Always `min(seen, capacity)`.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// True when nothing was kept.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// True when more candidates were offered than kept.
    pub fn is_truncated(&self) -> bool {
        self.seen > self.docs.len() as u64
    }

    /// Finalize the collection for reading.
    pub fn into_hits(self) -> CollectedHits {
        CollectedHits {
            docs: self.docs,
            scores: self.scores,
            seen: self.seen,
        }
    }
}
