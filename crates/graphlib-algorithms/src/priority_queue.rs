//! Indexed binary min-heap
//!
//! Min-priority queue over string keys. A key -> slot map sits beside the
//! heap array so `decrease` can find an entry in O(1) and re-bubble it in
//! O(log n). Used by the shortest-path and spanning-tree algorithms.

use crate::error::{AlgoError, AlgoResult};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
struct HeapEntry {
    key: String,
    priority: f64,
}

/// A minimum priority queue with decrease-key support.
///
/// The array is 0-indexed: the parent of slot `i` is `(i - 1) / 2` and its
/// children are `2i + 1` and `2i + 2`.
#[derive(Debug, Clone, Default)]
pub struct PriorityQueue {
    heap: Vec<HeapEntry>,
    positions: FxHashMap<String, usize>,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue {
            heap: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Number of entries in the queue
    pub fn size(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Keys currently in the queue, in heap order
    pub fn keys(&self) -> Vec<&str> {
        self.heap.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn has(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Current priority of `key`, if present
    pub fn priority(&self, key: &str) -> Option<f64> {
        self.positions.get(key).map(|&idx| self.heap[idx].priority)
    }

    /// Key with the smallest priority, without removing it
    pub fn min(&self) -> AlgoResult<&str> {
        self.heap
            .first()
            .map(|e| e.key.as_str())
            .ok_or(AlgoError::QueueUnderflow)
    }

    /// Insert `key` with `priority`.
    ///
    /// Returns `false` and leaves the queue untouched if the key is already
    /// present.
    pub fn add(&mut self, key: impl Into<String>, priority: f64) -> bool {
        let key = key.into();
        if self.positions.contains_key(&key) {
            return false;
        }
        let idx = self.heap.len();
        self.positions.insert(key.clone(), idx);
        self.heap.push(HeapEntry { key, priority });
        self.sift_up(idx);
        true
    }

    /// Remove and return the key with the smallest priority.
    pub fn remove_min(&mut self) -> AlgoResult<String> {
        if self.heap.is_empty() {
            return Err(AlgoError::QueueUnderflow);
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop().ok_or(AlgoError::QueueUnderflow)?;
        self.positions.remove(&entry.key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok(entry.key)
    }

    /// Lower the priority of an existing key.
    ///
    /// Fails if the key is unknown or if `priority` is greater than the key's
    /// current priority.
    pub fn decrease(&mut self, key: &str, priority: f64) -> AlgoResult<()> {
        let idx = *self
            .positions
            .get(key)
            .ok_or_else(|| AlgoError::KeyNotFound(key.to_string()))?;
        let current = self.heap[idx].priority;
        if priority > current {
            return Err(AlgoError::PriorityIncrease {
                key: key.to_string(),
                current,
                requested: priority,
            });
        }
        self.heap[idx].priority = priority;
        self.sift_up(idx);
        Ok(())
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.heap[parent].priority <= self.heap[idx].priority {
                break;
            }
            self.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;
            if left < len && self.heap[left].priority < self.heap[smallest].priority {
                smallest = left;
            }
            if right < len && self.heap[right].priority < self.heap[smallest].priority {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.swap(idx, smallest);
            idx = smallest;
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.heap.swap(i, j);
        if let Some(pos) = self.positions.get_mut(&self.heap[i].key) {
            *pos = i;
        }
        if let Some(pos) = self.positions.get_mut(&self.heap[j].key) {
            *pos = j;
        }
    }

    #[cfg(test)]
    fn is_heap_ordered(&self) -> bool {
        (1..self.heap.len()).all(|i| self.heap[(i - 1) / 2].priority <= self.heap[i].priority)
            && self.heap.iter().enumerate().all(|(i, e)| self.positions.get(&e.key) == Some(&i))
    }
}
