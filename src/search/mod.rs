//! Grid search: index construction, query dispatch and ranking.
//!
//! This module provides functionality to:
//! - Build a prefix index over a validated grid
//! - Evaluate query words sequentially or across a worker pool
//! - Rank the most frequent matches
//! - Monitor find metrics

pub mod config;
pub mod engine;
pub mod metrics;
pub mod pool;

pub use config::{Aggregation, ExecutionMode, FindOptions, MAX_WORKERS, MIN_WORKERS};
pub use engine::SearchEngine;
pub use metrics::{FindMetrics, FindMetricsCollector};
pub use pool::WorkerPool;
