//! Metric primitives consumed by the instrumentation layer.
//!
//! The registry hands out thread-safe [`Counter`] and [`Timer`] instruments
//! keyed by a hierarchical `prefix.operation.metric` name, so the same
//! instrument is shared by every caller that asks for the same key. Counters
//! and timers support concurrent updates without external locking.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use ahash::AHashMap;
use parking_lot::RwLock;

/// A monotonically increasing counter.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    /// Increment the counter by one.
    pub fn increment(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    /// Current counter value.
    pub fn count(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// A timer that aggregates observed durations.
///
/// Recording is lock-free; min/max are maintained with compare-exchange loops
/// the same way the search metrics collectors do.
#[derive(Debug)]
pub struct Timer {
    count: AtomicU64,
    total_nanos: AtomicU64,
    min_nanos: AtomicU64,
    max_nanos: AtomicU64,
}

impl Default for Timer {
    fn default() -> Self {
        Timer {
            count: AtomicU64::new(0),
            total_nanos: AtomicU64::new(0),
            min_nanos: AtomicU64::new(u64::MAX),
            max_nanos: AtomicU64::new(0),
        }
    }
}

impl Timer {
    /// Start timing one event. The returned context records the elapsed time
    /// into this timer when stopped or dropped, whichever comes first.
    pub fn start(self: &Arc<Self>) -> TimerContext {
        TimerContext {
            timer: Arc::clone(self),
            started: Instant::now(),
            recorded: false,
        }
    }

    /// Record a single observed duration.
    pub fn record(&self, elapsed: Duration) {
        let nanos = elapsed.as_nanos().min(u64::MAX as u128) as u64;
        self.count.fetch_add(1, Ordering::Relaxed);
        self.total_nanos.fetch_add(nanos, Ordering::Relaxed);
        self.min_nanos.fetch_min(nanos, Ordering::Relaxed);
        self.max_nanos.fetch_max(nanos, Ordering::Relaxed);
    }

    /// Number of recorded events.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Sum of all recorded durations.
    pub fn total(&self) -> Duration {
        Duration::from_nanos(self.total_nanos.load(Ordering::Relaxed))
    }

    /// Shortest recorded duration, if any event was recorded.
    pub fn min(&self) -> Option<Duration> {
        match self.min_nanos.load(Ordering::Relaxed) {
            u64::MAX => None,
            nanos => Some(Duration::from_nanos(nanos)),
        }
    }

    /// Longest recorded duration, if any event was recorded.
    pub fn max(&self) -> Option<Duration> {
        match self.count() {
            0 => None,
            _ => Some(Duration::from_nanos(self.max_nanos.load(Ordering::Relaxed))),
        }
    }
}

/// An in-flight timing started by [`Timer::start`].
///
/// Records exactly once: either on an explicit [`stop`](TimerContext::stop) or
/// on drop. The drop path is what guarantees a timing is recorded even when
/// the timed operation fails or unwinds.
#[derive(Debug)]
pub struct TimerContext {
    timer: Arc<Timer>,
    started: Instant,
    recorded: bool,
}

impl TimerContext {
    /// Stop the timing and record the elapsed duration.
    pub fn stop(mut self) {
        self.record_once();
    }

    fn record_once(&mut self) {
        if !self.recorded {
            self.recorded = true;
            self.timer.record(self.started.elapsed());
        }
    }
}

impl Drop for TimerContext {
    fn drop(&mut self) {
        self.record_once();
    }
}

#[derive(Debug, Default)]
struct RegistryInner {
    counters: RwLock<AHashMap<String, Arc<Counter>>>,
    timers: RwLock<AHashMap<String, Arc<Timer>>>,
}

/// A registry of named counters and timers.
///
/// Cloning is cheap and clones share the same instruments. Instrument names
/// are hierarchical: `prefix.operation.metric`.
#[derive(Debug, Clone, Default)]
pub struct MetricRegistry {
    inner: Arc<RegistryInner>,
}

impl MetricRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn metric_name(prefix: &str, operation: &str, metric: &str) -> String {
        format!("{prefix}.{operation}.{metric}")
    }

    /// Get or create the counter named `prefix.operation.metric`.
    pub fn counter(&self, prefix: &str, operation: &str, metric: &str) -> Arc<Counter> {
        let name = Self::metric_name(prefix, operation, metric);
        if let Some(counter) = self.inner.counters.read().get(&name) {
            return Arc::clone(counter);
        }
        let mut counters = self.inner.counters.write();
        Arc::clone(counters.entry(name).or_default())
    }

    /// Get or create the timer named `prefix.operation.metric`.
    pub fn timer(&self, prefix: &str, operation: &str, metric: &str) -> Arc<Timer> {
        let name = Self::metric_name(prefix, operation, metric);
        if let Some(timer) = self.inner.timers.read().get(&name) {
            return Arc::clone(timer);
        }
        let mut timers = self.inner.timers.write();
        Arc::clone(timers.entry(name).or_default())
    }

    /// Current value of a counter, or 0 if it was never created.
    pub fn counter_value(&self, prefix: &str, operation: &str, metric: &str) -> u64 {
        let name = Self::metric_name(prefix, operation, metric);
        self.inner
            .counters
            .read()
            .get(&name)
            .map(|c| c.count())
            .unwrap_or(0)
    }

    /// Number of recordings of a timer, or 0 if it was never created.
    pub fn timer_count(&self, prefix: &str, operation: &str, metric: &str) -> u64 {
        let name = Self::metric_name(prefix, operation, metric);
        self.inner
            .timers
            .read()
            .get(&name)
            .map(|t| t.count())
            .unwrap_or(0)
    }

    /// True if no instrument has ever been requested from this registry.
    pub fn is_empty(&self) -> bool {
        self.inner.counters.read().is_empty() && self.inner.timers.read().is_empty()
    }
}
