//! Metrics collection for `find` calls.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Metrics accumulated over every `find` call on one engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindMetrics {
    /// Number of completed `find` calls.
    pub total_finds: u64,

    /// Number of query words evaluated against the index.
    pub queries_evaluated: u64,

    /// Number of evaluated words that occur at least once.
    pub matches: u64,

    /// Total time spent inside `find`.
    pub total_execution_time: Duration,

    /// Shortest `find` call.
    pub min_execution_time: Duration,

    /// Longest `find` call.
    pub max_execution_time: Duration,
}

impl FindMetrics {
    /// Average time per `find` call.
    pub fn avg_execution_time(&self) -> Duration {
        if self.total_finds == 0 {
            Duration::ZERO
        } else {
            let nanos = self.total_execution_time.as_nanos() / u128::from(self.total_finds);
            Duration::from_nanos(nanos as u64)
        }
    }
}

/// Lock-free collector shared by the engine and its workers.
#[derive(Debug)]
pub struct FindMetricsCollector {
    total_finds: AtomicU64,
    queries_evaluated: AtomicU64,
    matches: AtomicU64,
    total_execution_nanos: AtomicU64,
    max_execution_nanos: AtomicU64,
    min_execution_nanos: AtomicU64,
}

impl FindMetricsCollector {
    pub fn new() -> Self {
        Self {
            total_finds: AtomicU64::new(0),
            queries_evaluated: AtomicU64::new(0),
            matches: AtomicU64::new(0),
            total_execution_nanos: AtomicU64::new(0),
            max_execution_nanos: AtomicU64::new(0),
            min_execution_nanos: AtomicU64::new(u64::MAX),
        }
    }

    /// Record the outcome of one `find` call.
    pub fn record_find(&self, execution_time: Duration, queries: u64, matches: u64) {
        self.total_finds.fetch_add(1, Ordering::Relaxed);
        self.queries_evaluated.fetch_add(queries, Ordering::Relaxed);
        self.matches.fetch_add(matches, Ordering::Relaxed);

        let nanos = execution_time.as_nanos() as u64;
        self.total_execution_nanos
            .fetch_add(nanos, Ordering::Relaxed);
        self.max_execution_nanos.fetch_max(nanos, Ordering::Relaxed);
        self.min_execution_nanos.fetch_min(nanos, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> FindMetrics {
        let min_nanos = self.min_execution_nanos.load(Ordering::Relaxed);

        FindMetrics {
            total_finds: self.total_finds.load(Ordering::Relaxed),
            queries_evaluated: self.queries_evaluated.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
            total_execution_time: Duration::from_nanos(
                self.total_execution_nanos.load(Ordering::Relaxed),
            ),
            min_execution_time: if min_nanos == u64::MAX {
                Duration::ZERO
            } else {
                Duration::from_nanos(min_nanos)
            },
            max_execution_time: Duration::from_nanos(
                self.max_execution_nanos.load(Ordering::Relaxed),
            ),
        }
    }

    pub fn reset(&self) {
        self.total_finds.store(0, Ordering::Relaxed);
        self.queries_evaluated.store(0, Ordering::Relaxed);
        self.matches.store(0, Ordering::Relaxed);
        self.total_execution_nanos.store(0, Ordering::Relaxed);
        self.max_execution_nanos.store(0, Ordering::Relaxed);
        self.min_execution_nanos.store(u64::MAX, Ordering::Relaxed);
    }
}

impl Default for FindMetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-call tally kept by a single worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkTally {
    pub queries: u64,
    pub matches: u64,
}

impl WorkTally {
    pub fn record(&mut self, count: usize) {
        self.queries += 1;
        if count > 0 {
            self.matches += 1;
        }
    }

    pub fn combine(self, other: WorkTally) -> WorkTally {
        WorkTally {
            queries: self.queries + other.queries,
            matches: self.matches + other.matches,
        }
    }
}

/// Helper for timing operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return elapsed time.
    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}
