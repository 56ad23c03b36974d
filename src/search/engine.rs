//! Grid search engine: builds the index once and ranks query matches.

use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use crate::error::Result;
use crate::grid::{Grid, fold_word};
use crate::index::PrefixIndex;
use crate::search::config::{Aggregation, ExecutionMode, FindOptions, MAX_WORKERS};
use crate::search::metrics::{FindMetrics, FindMetricsCollector, Timer, WorkTally};
use crate::search::pool::WorkerPool;
use crate::topk::{BoundedTopK, DEFAULT_TOP_K, RankedWord, TopKCollector, WordSink};

/// Finds the most frequent grid matches among a stream of query words.
///
/// The grid and its index are fixed at construction. Rankings accumulate
/// across `find` calls on the same engine until
/// [`reset_rankings`](Self::reset_rankings) is called.
///
/// # Examples
///
/// ```
/// use gridfind::search::{FindOptions, SearchEngine};
///
/// let engine = SearchEngine::new(&["abcdc", "fgwio", "chill", "pqnsd", "uvdxy"]).unwrap();
/// let found = engine
///     .find(["cold", "wind", "chill"], &FindOptions::sequential())
///     .unwrap();
///
/// assert_eq!(found, vec!["chill", "cold", "wind"]);
/// ```
#[derive(Debug)]
pub struct SearchEngine {
    grid: Grid,
    index: PrefixIndex,
    top_words: BoundedTopK,
    metrics: FindMetricsCollector,
    pool: Mutex<Option<Arc<WorkerPool>>>,
}

impl SearchEngine {
    /// Validate `rows` and build the engine.
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        Ok(Self::from_grid(Grid::new(rows)?))
    }

    /// Validate rows that may be absent and build the engine.
    pub fn from_optional_rows<S: AsRef<str>>(rows: Option<&[Option<S>]>) -> Result<Self> {
        Ok(Self::from_grid(Grid::from_optional_rows(rows)?))
    }

    /// Build the engine for an already validated grid.
    pub fn from_grid(grid: Grid) -> Self {
        let timer = Timer::start();
        let index = PrefixIndex::from_grid(&grid);

        debug!(
            "Indexed {}x{} grid: {} suffixes, {} prefixes in {:?}",
            grid.height(),
            grid.width(),
            index.inserted_sequences(),
            index.node_count(),
            timer.stop()
        );

        Self {
            grid,
            index,
            top_words: BoundedTopK::new(DEFAULT_TOP_K),
            metrics: FindMetricsCollector::new(),
            pool: Mutex::new(None),
        }
    }

    /// Evaluate `queries` and return the ranked matching words.
    pub fn find<I>(&self, queries: I, options: &FindOptions) -> Result<Vec<String>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Ok(self
            .find_ranked(queries, options)?
            .into_iter()
            .map(|ranked| ranked.word)
            .collect())
    }

    /// Evaluate `queries` and return the ranked matches with their counts.
    pub fn find_ranked<I>(&self, queries: I, options: &FindOptions) -> Result<Vec<RankedWord>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        options.validate()?;

        let timer = Timer::start();
        let words = queries.into_iter().map(|query| fold_word(query.as_ref()));

        let tally = match options.mode {
            ExecutionMode::Sequential => {
                let mut sink = &self.top_words;
                self.drain(words, &mut sink)
            }
            ExecutionMode::Pooled => self.find_pooled(words, options)?,
        };

        let elapsed = timer.stop();
        self.metrics
            .record_find(elapsed, tally.queries, tally.matches);

        debug!(
            "Evaluated {} words ({} matched) with {:?} in {:?}",
            tally.queries, tally.matches, options.mode, elapsed
        );

        Ok(self.top_words.snapshot())
    }

    fn find_pooled<I>(&self, words: I, options: &FindOptions) -> Result<WorkTally>
    where
        I: Iterator<Item = Vec<char>>,
    {
        let pool = self.worker_pool()?;
        let (workers, capacity) = (options.worker_count, options.queue_capacity);

        let tally = match options.aggregation {
            Aggregation::Shared => pool
                .run(workers, capacity, words, |queue| {
                    let mut sink = &self.top_words;
                    self.drain(queue.iter(), &mut sink)
                })?
                .into_iter()
                .fold(WorkTally::default(), WorkTally::combine),
            Aggregation::Partitioned => {
                let top_k = self.top_words.capacity();
                let mut tally = WorkTally::default();

                for (local, worker_tally) in pool.run(workers, capacity, words, |queue| {
                    let mut local = TopKCollector::new(top_k);
                    let worker_tally = self.drain(queue.iter(), &mut local);
                    (local, worker_tally)
                })? {
                    self.top_words.merge(local);
                    tally = tally.combine(worker_tally);
                }

                tally
            }
        };

        Ok(tally)
    }

    /// The engine's worker pool, started on the first pooled find.
    fn worker_pool(&self) -> Result<Arc<WorkerPool>> {
        let mut slot = self.pool.lock();
        if let Some(pool) = slot.as_ref() {
            return Ok(Arc::clone(pool));
        }

        let pool = Arc::new(WorkerPool::new(MAX_WORKERS)?);
        debug!("Started worker pool with {} threads", pool.threads());
        *slot = Some(Arc::clone(&pool));
        Ok(pool)
    }

    /// Look up each folded word and offer the matches to `sink`.
    fn drain<I, K>(&self, words: I, sink: &mut K) -> WorkTally
    where
        I: IntoIterator<Item = Vec<char>>,
        K: WordSink,
    {
        let mut tally = WorkTally::default();

        for word in words {
            let count = self.index.count_with_prefix(&word);
            tally.record(count);

            if count > 0 {
                sink.offer(&word.iter().collect::<String>(), count);
            }
        }

        tally
    }

    /// Number of horizontal and vertical positions where `word` starts.
    pub fn occurrences(&self, word: &str) -> usize {
        self.index.count_with_prefix(&fold_word(word))
    }

    /// Current ranking accumulated over every `find` call.
    pub fn rankings(&self) -> Vec<RankedWord> {
        self.top_words.snapshot()
    }

    /// Forget every ranked word so the next `find` starts fresh.
    pub fn reset_rankings(&self) {
        self.top_words.clear();
    }

    pub fn metrics(&self) -> FindMetrics {
        self.metrics.snapshot()
    }

    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn index(&self) -> &PrefixIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridFindError;

    fn sample_engine() -> SearchEngine {
        SearchEngine::new(&["abcdc", "fgwio", "chill", "pqnsd", "uvdxy", "chill", "chill"]).unwrap()
    }

    #[test]
    fn test_find_sequential() {
        let engine = sample_engine();
        let found = engine
            .find(["cold", "wind", "snow", "chill", "wind"], &FindOptions::sequential())
            .unwrap();

        // "cold" runs down the last column and "wind" down the middle one.
        assert_eq!(found, vec!["chill", "cold", "wind"]);
        assert_eq!(
            engine.rankings(),
            vec![
                RankedWord::new("chill", 3),
                RankedWord::new("cold", 1),
                RankedWord::new("wind", 1)
            ]
        );
    }

    #[test]
    fn test_queries_are_case_folded() {
        let engine = sample_engine();
        let found = engine.find(["CHILL", "Chill"], &FindOptions::sequential()).unwrap();
        assert_eq!(found, vec!["chill"]);
        assert_eq!(engine.occurrences("ChIlL"), 3);
    }

    #[test]
    fn test_empty_and_unknown_words_contribute_nothing() {
        let engine = sample_engine();
        let found = engine
            .find(["", "zzz", "chillchill"], &FindOptions::sequential())
            .unwrap();
        assert!(found.is_empty());

        let none: [&str; 0] = [];
        assert!(engine.find(none, &FindOptions::sequential()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_options_rejected_before_evaluation() {
        let engine = sample_engine();

        let error = engine
            .find(["chill"], &FindOptions::pooled(0))
            .unwrap_err();
        assert!(matches!(error, GridFindError::InvalidExecutionConfig(_)));

        assert!(engine.find(["chill"], &FindOptions::pooled(11)).is_err());
        assert!(engine.rankings().is_empty());
        assert_eq!(engine.metrics().total_finds, 0);
    }

    #[test]
    fn test_rankings_accumulate_until_reset() {
        let engine = sample_engine();
        engine.find(["chill"], &FindOptions::sequential()).unwrap();

        let found = engine.find(["wind"], &FindOptions::sequential()).unwrap();
        assert_eq!(found, vec!["chill", "wind"]);

        engine.reset_rankings();
        let found = engine.find(["wind"], &FindOptions::sequential()).unwrap();
        assert_eq!(found, vec!["wind"]);
    }

    #[test]
    fn test_pooled_matches_sequential() {
        let words = ["cold", "wind", "snow", "chill", "wind", "c", "l", "hi", "ab"];

        let expected = sample_engine()
            .find_ranked(words, &FindOptions::sequential())
            .unwrap();

        for aggregation in [Aggregation::Shared, Aggregation::Partitioned] {
            for workers in 1..=10 {
                let options = FindOptions::pooled(workers)
                    .with_aggregation(aggregation)
                    .with_queue_capacity(2);
                let ranked = sample_engine().find_ranked(words, &options).unwrap();
                assert_eq!(ranked, expected, "{aggregation:?} with {workers} workers");
            }
        }
    }

    #[test]
    fn test_pooled_finds_reuse_one_pool() {
        let engine = sample_engine();
        engine.find(["chill"], &FindOptions::sequential()).unwrap();
        assert!(engine.pool.lock().is_none());

        engine.find(["chill"], &FindOptions::pooled(2)).unwrap();
        let first = engine.pool.lock().clone().unwrap();

        let options = FindOptions::pooled(10).with_aggregation(Aggregation::Shared);
        engine.find(["cold", "wind"], &options).unwrap();
        let second = engine.pool.lock().clone().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.threads(), MAX_WORKERS);
        assert_eq!(engine.find(["wind"], &options).unwrap(), vec!["chill", "cold", "wind"]);
    }

    #[test]
    fn test_metrics_recorded() {
        let engine = sample_engine();
        engine
            .find(["chill", "cold", "wind"], &FindOptions::pooled(3))
            .unwrap();

        let metrics = engine.metrics();
        assert_eq!(metrics.total_finds, 1);
        assert_eq!(metrics.queries_evaluated, 3);
        assert_eq!(metrics.matches, 3);

        engine.reset_metrics();
        assert_eq!(engine.metrics().total_finds, 0);
    }
}
