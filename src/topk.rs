//! Bounded collectors that keep the most frequent distinct words.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use ahash::AHashSet;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Number of words kept by default.
pub const DEFAULT_TOP_K: usize = 10;

/// A matched word with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankedWord {
    pub word: String,
    pub count: usize,
}

impl RankedWord {
    pub fn new<S: Into<String>>(word: S, count: usize) -> Self {
        RankedWord {
            word: word.into(),
            count,
        }
    }
}

/// Destination for matched words and their counts.
pub trait WordSink {
    fn offer(&mut self, word: &str, count: usize);
}

/// Heap entry ordered so that the smallest count sits on top.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeapEntry(RankedWord);

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: lower counts come first
        other
            .0
            .count
            .cmp(&self.0.count)
            .then_with(|| self.0.word.cmp(&other.0.word))
    }
}

/// Single-owner top-k bookkeeping.
///
/// A word is accepted at most once; later offers of the same word are
/// ignored even if they carry a different count. Whenever the collector
/// grows past its capacity the lowest entry is evicted and its count becomes
/// the threshold every later offer must exceed.
#[derive(Debug, Clone)]
pub struct TopKCollector {
    capacity: usize,
    threshold: usize,
    heap: BinaryHeap<HeapEntry>,
    members: AHashSet<String>,
}

impl TopKCollector {
    /// Create a new collector keeping at most `capacity` words.
    pub fn new(capacity: usize) -> Self {
        TopKCollector {
            capacity,
            threshold: 0,
            heap: BinaryHeap::with_capacity(capacity + 1),
            members: AHashSet::with_capacity(capacity + 1),
        }
    }

    /// Offer a word with its count.
    pub fn offer(&mut self, word: &str, count: usize) {
        if count <= self.threshold || self.members.contains(word) {
            return;
        }

        self.members.insert(word.to_string());
        self.heap.push(HeapEntry(RankedWord::new(word, count)));

        if self.heap.len() > self.capacity
            && let Some(HeapEntry(evicted)) = self.heap.pop()
        {
            self.members.remove(&evicted.word);
            self.threshold = evicted.count;
        }
    }

    /// Count every later offer must exceed to be considered.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Maximum number of words kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Entries sorted by descending count.
    ///
    /// Equal counts come out in word order, but callers should not rely on
    /// any particular order among ties.
    pub fn snapshot(&self) -> Vec<RankedWord> {
        let mut entries: Vec<_> = self.heap.iter().map(|entry| entry.0.clone()).collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        entries
    }

    /// Consume the collector, yielding its entries in no particular order.
    pub fn into_entries(self) -> impl Iterator<Item = RankedWord> {
        self.heap.into_iter().map(|entry| entry.0)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.members.clear();
        self.threshold = 0;
    }
}

impl Default for TopKCollector {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl WordSink for TopKCollector {
    fn offer(&mut self, word: &str, count: usize) {
        TopKCollector::offer(self, word, count);
    }
}

/// Thread-safe top-k shared by concurrent workers.
///
/// The eviction threshold is mirrored in an atomic so offers that cannot
/// qualify return without taking the lock.
#[derive(Debug)]
pub struct BoundedTopK {
    threshold: AtomicUsize,
    state: Mutex<TopKCollector>,
}

impl BoundedTopK {
    /// Create a new shared top-k keeping at most `capacity` words.
    pub fn new(capacity: usize) -> Self {
        BoundedTopK {
            threshold: AtomicUsize::new(0),
            state: Mutex::new(TopKCollector::new(capacity)),
        }
    }

    /// Offer a word with its count.
    pub fn offer(&self, word: &str, count: usize) {
        if count <= self.threshold.load(AtomicOrdering::Acquire) {
            return;
        }

        let mut state = self.state.lock();
        state.offer(word, count);
        self.threshold.store(state.threshold(), AtomicOrdering::Release);
    }

    /// Fold a private collector into this one.
    pub fn merge(&self, collector: TopKCollector) {
        let mut state = self.state.lock();
        for entry in collector.into_entries() {
            state.offer(&entry.word, entry.count);
        }
        self.threshold.store(state.threshold(), AtomicOrdering::Release);
    }

    /// Entries sorted by descending count.
    pub fn snapshot(&self) -> Vec<RankedWord> {
        self.state.lock().snapshot()
    }

    pub fn threshold(&self) -> usize {
        self.threshold.load(AtomicOrdering::Acquire)
    }

    pub fn capacity(&self) -> usize {
        self.state.lock().capacity()
    }

    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().is_empty()
    }

    /// Forget every accepted word and reset the threshold.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.clear();
        self.threshold.store(0, AtomicOrdering::Release);
    }
}

impl Default for BoundedTopK {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl WordSink for &BoundedTopK {
    fn offer(&mut self, word: &str, count: usize) {
        BoundedTopK::offer(self, word, count);
    }
}
