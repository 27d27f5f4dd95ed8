//! Thread-safe ordering of scheduled events.
//!
//! `Timeline` guards an `EventHeap` with a single `parking_lot::Mutex`. Every
//! public method is one short critical section; nothing inside it blocks on
//! anything but the lock itself.
use log::{debug, trace};
use parking_lot::Mutex;

use super::heap::{Entry, EventHeap};

/// Thread-safe, time-ordered event scheduler.
#[derive(Debug)]
pub struct Timeline<T> {
    queue: Mutex<EventHeap<T>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Timeline::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(EventHeap::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: Mutex::new(EventHeap::with_capacity(capacity)),
        }
    }

    /// Schedule `event` to fire at `fire_at`.
    pub fn schedule(&self, event: T, fire_at: i64) {
        let mut queue = self.queue.lock();
        queue.push(Entry::new(event, fire_at));
        trace!("scheduled event at {fire_at}, {} pending", queue.len());
    }

    /// Firing time of the closest scheduled event, `None` when nothing is pending.
    pub fn closest(&self) -> Option<i64> {
        self.queue.lock().peek_min().ok().map(Entry::fire_at)
    }

    /// Drain every event due at or before `moment`, in non-decreasing firing
    /// order. Events sharing an instant come out in no particular order.
    pub fn fired(&self, moment: i64) -> Vec<T> {
        let mut fired = Vec::new();
        let mut queue = self.queue.lock();
        while queue.peek_min().is_ok_and(|next| next.fire_at() <= moment) {
            match queue.pop_min() {
                Ok(entry) => fired.push(entry.into_payload()),
                Err(_) => break,
            }
        }
        if !fired.is_empty() {
            debug!(
                "{} events fired by {moment}, {} pending",
                fired.len(),
                queue.len()
            );
        }
        fired
    }

    /// Cancel the first pending event matching `predicate`.
    ///
    /// The scan follows heap layout, so when several events match, which one is
    /// removed is unspecified. Returns whether anything was removed.
    pub fn remove<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let mut queue = self.queue.lock();
        let Some(idx) = queue.position(predicate) else {
            return false;
        };
        match queue.remove_at(idx) {
            Ok(entry) => {
                trace!("removed event due at {}", entry.fire_at());
                true
            }
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    #[cfg(test)]
    fn is_heap(&self) -> bool {
        self.queue.lock().is_heap()
    }
}
