//! Execution options for `find` calls.

use serde::{Deserialize, Serialize};

use crate::error::{GridFindError, Result};

/// Smallest accepted worker count.
pub const MIN_WORKERS: usize = 1;

/// Largest accepted worker count.
pub const MAX_WORKERS: usize = 10;

/// How query words are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One word at a time on the calling thread.
    Sequential,

    /// A fixed pool of workers pulling words from a shared queue.
    Pooled,
}

/// Where pooled workers record their matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Every worker offers to the engine's single locked top-k.
    Shared,

    /// Each worker keeps a private top-k, folded in after all workers join.
    Partitioned,
}

/// Options for a single `find` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindOptions {
    /// Execution strategy.
    pub mode: ExecutionMode,

    /// Number of workers used in pooled mode.
    pub worker_count: usize,

    /// How pooled workers aggregate their matches.
    pub aggregation: Aggregation,

    /// Maximum number of words waiting in the shared queue.
    pub queue_capacity: usize,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Sequential,
            worker_count: default_worker_count(),
            aggregation: Aggregation::Partitioned,
            queue_capacity: 1024,
        }
    }
}

/// Worker count matching the available cores, clamped to the accepted range.
pub fn default_worker_count() -> usize {
    num_cpus::get().clamp(MIN_WORKERS, MAX_WORKERS)
}

impl FindOptions {
    /// Sequential evaluation on the calling thread.
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Pooled evaluation with the given number of workers.
    pub fn pooled(worker_count: usize) -> Self {
        Self {
            mode: ExecutionMode::Pooled,
            worker_count,
            ..Default::default()
        }
    }

    /// Set the execution mode.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the worker count.
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set the aggregation strategy.
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Set the shared queue capacity.
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    /// Check the options before any query is evaluated.
    ///
    /// The worker count is checked in every mode so a bad value never
    /// passes silently just because the call happened to be sequential.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_WORKERS..=MAX_WORKERS).contains(&self.worker_count) {
            return Err(GridFindError::invalid_config(format!(
                "worker count must be between {MIN_WORKERS} and {MAX_WORKERS}, but it is {}",
                self.worker_count
            )));
        }

        if self.queue_capacity == 0 {
            return Err(GridFindError::invalid_config(
                "queue capacity must be at least 1",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = FindOptions::default();
        assert_eq!(options.mode, ExecutionMode::Sequential);
        assert_eq!(options.aggregation, Aggregation::Partitioned);
        assert!((MIN_WORKERS..=MAX_WORKERS).contains(&options.worker_count));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_builder() {
        let options = FindOptions::sequential()
            .with_mode(ExecutionMode::Pooled)
            .with_worker_count(4)
            .with_aggregation(Aggregation::Shared)
            .with_queue_capacity(16);

        assert_eq!(options.mode, ExecutionMode::Pooled);
        assert_eq!(options.worker_count, 4);
        assert_eq!(options.aggregation, Aggregation::Shared);
        assert_eq!(options.queue_capacity, 16);
    }

    #[test]
    fn test_worker_count_range() {
        for workers in MIN_WORKERS..=MAX_WORKERS {
            assert!(FindOptions::pooled(workers).validate().is_ok());
        }

        for workers in [0, MAX_WORKERS + 1] {
            let error = FindOptions::pooled(workers).validate().unwrap_err();
            assert!(matches!(error, GridFindError::InvalidExecutionConfig(_)));
            assert!(error.to_string().contains(&workers.to_string()));
        }

        assert!(FindOptions::sequential().with_worker_count(0).validate().is_err());
    }

    #[test]
    fn test_zero_queue_capacity_rejected() {
        let options = FindOptions::pooled(2).with_queue_capacity(0);
        assert!(matches!(
            options.validate(),
            Err(GridFindError::InvalidExecutionConfig(_))
        ));
    }

    #[test]
    fn test_options_serde() {
        let json = serde_json::to_string(&FindOptions::pooled(3)).unwrap();
        assert!(json.contains("\"mode\":\"pooled\""));

        let options: FindOptions = serde_json::from_str(
            r#"{"mode":"sequential","worker_count":2,"aggregation":"shared","queue_capacity":8}"#,
        )
        .unwrap();
        assert_eq!(options.aggregation, Aggregation::Shared);
        assert_eq!(options.worker_count, 2);
    }
}
