//! Max-priority queue used by both placers.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct QueueEntry<K, T> {
    key: K,
    seq: u64,
    item: T,
}

impl<K: Ord, T> PartialEq for QueueEntry<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}
impl<K: Ord, T> Eq for QueueEntry<K, T> {}

impl<K: Ord, T> PartialOrd for QueueEntry<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, T> Ord for QueueEntry<K, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is max-heap: biggest key first, then smallest seq.
        self.key
            .cmp(&other.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Highest key pops first; equal keys pop in insertion order.
#[derive(Debug, Clone)]
pub struct PriorityQueue<K, T> {
    heap: BinaryHeap<QueueEntry<K, T>>,
    seq: u64,
}

impl<K: Ord, T> Default for PriorityQueue<K, T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }
}

impl<K: Ord, T> PriorityQueue<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T, key: K) {
        self.seq += 1;
        self.heap.push(QueueEntry {
            key,
            seq: self.seq,
            item,
        });
    }

    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|e| e.item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
