//! Fixed-size worker pool draining a bounded shared queue.

use crossbeam_channel::{Receiver, bounded, unbounded};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{GridFindError, Result};

/// A fixed set of threads whose workers pull items one at a time from a
/// shared queue.
///
/// The threads live as long as the pool and are reused by every
/// [`run`](Self::run). Each run asks for up to [`threads`](Self::threads)
/// workers. The calling thread feeds the queue while the workers drain it,
/// so at most `queue_capacity` items are buffered no matter how long the
/// input is.
#[derive(Debug)]
pub struct WorkerPool {
    pool: ThreadPool,
    threads: usize,
}

impl WorkerPool {
    /// Start a pool of `threads` named threads.
    pub fn new(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("gridfind-worker-{i}"))
            .build()
            .map_err(|e| GridFindError::internal(format!("Failed to create thread pool: {e}")))?;

        Ok(Self { pool, threads })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Run `work` on `workers` workers against a queue of `queue_capacity`
    /// fed from `items`.
    ///
    /// Each worker receives the queue and returns its own output once the
    /// queue is closed and empty. Outputs come back in completion order, and
    /// the call returns only after every worker has finished.
    pub fn run<I, T, S, F>(
        &self,
        workers: usize,
        queue_capacity: usize,
        items: I,
        work: F,
    ) -> Result<Vec<S>>
    where
        I: IntoIterator<Item = T>,
        T: Send,
        S: Send,
        F: Fn(&Receiver<T>) -> S + Sync,
    {
        // Every worker blocks on the queue, so each needs a thread of its own.
        if workers == 0 || workers > self.threads {
            return Err(GridFindError::invalid_config(format!(
                "worker count {workers} outside 1..={}",
                self.threads
            )));
        }
        if queue_capacity == 0 {
            return Err(GridFindError::invalid_config(
                "queue capacity must be at least 1",
            ));
        }

        let (queue_tx, queue_rx) = bounded::<T>(queue_capacity);
        let (output_tx, output_rx) = unbounded::<S>();

        self.pool.in_place_scope(|scope| {
            for _ in 0..workers {
                let queue = queue_rx.clone();
                let output = output_tx.clone();
                let work = &work;
                scope.spawn(move |_| {
                    // output_rx is dropped only after the scope joins, so this cannot fail.
                    let _ = output.send(work(&queue));
                });
            }
            drop(queue_rx);

            for item in items {
                // Every worker is gone; nothing left to feed.
                if queue_tx.send(item).is_err() {
                    break;
                }
            }
            drop(queue_tx);
        });
        drop(output_tx);

        Ok(output_rx.try_iter().collect())
    }
}
