//! Array-backed binary min-heap of timestamped events.
//!
//! Entries are ordered by `fire_at` only. Entries sharing the same instant come
//! out in whatever order the sift operations leave them; insertion order is not
//! preserved for ties.
use std::slice::Iter;

use crate::TimelineError;

/// A payload paired with the instant it should fire at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<T> {
    payload: T,
    fire_at: i64,
}

impl<T> Entry<T> {
    pub fn new(payload: T, fire_at: i64) -> Self {
        Self { payload, fire_at }
    }

    pub fn fire_at(&self) -> i64 {
        self.fire_at
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Binary min-heap over `Entry::fire_at`.
#[derive(Debug, Clone)]
pub struct EventHeap<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for EventHeap<T> {
    fn default() -> Self {
        EventHeap::new()
    }
}

impl<T> EventHeap<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in backing layout order, not firing order.
    pub fn iter(&self) -> Iter<'_, Entry<T>> {
        self.entries.iter()
    }

    /// Append and sift up. O(log n).
    pub fn push(&mut self, entry: Entry<T>) {
        self.entries.push(entry);
        self.sift_up(self.entries.len() - 1);
    }

    /// Root entry, the earliest `fire_at`. O(1).
    pub fn peek_min(&self) -> Result<&Entry<T>, TimelineError> {
        self.entries.first().ok_or(TimelineError::Empty)
    }

    /// Remove and return the root entry. O(log n).
    pub fn pop_min(&mut self) -> Result<Entry<T>, TimelineError> {
        if self.entries.is_empty() {
            return Err(TimelineError::Empty);
        }
        let min = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    /// Remove the entry at `index` in layout order, restoring the heap property
    /// by sifting the relocated last entry whichever way it needs to go.
    pub fn remove_at(&mut self, index: usize) -> Result<Entry<T>, TimelineError> {
        let len = self.entries.len();
        if index >= len {
            return Err(TimelineError::OutOfRange { index, len });
        }
        if index == len - 1 {
            // bounds checked above
            return self.entries.pop().ok_or(TimelineError::Empty);
        }
        let removed = self.entries.swap_remove(index);
        if index > 0 && self.less(index, (index - 1) / 2) {
            self.sift_up(index);
        } else {
            self.sift_down(index);
        }
        Ok(removed)
    }

    /// Layout index of the first entry whose payload matches. O(n).
    pub fn position<F>(&self, mut predicate: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.entries.iter().position(|entry| predicate(&entry.payload))
    }

    /// Whether every non-root entry fires no earlier than its parent.
    pub fn is_heap(&self) -> bool {
        (1..self.entries.len()).all(|i| !self.less(i, (i - 1) / 2))
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.entries[a].fire_at < self.entries[b].fire_at
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.less(idx, parent) {
                break;
            }
            self.entries.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, idx) {
                break;
            }
            self.entries.swap(idx, child);
            idx = child;
        }
    }
}
