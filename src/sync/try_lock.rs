//! Non-blocking lock built on a single atomic flag.
//!
//! Acquisition never waits: it either takes the flag or reports that someone
//! else holds it. Waiters can starve, so this only fits "skip if busy" paths;
//! reach for a mutex anywhere a caller must eventually get in.
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

#[derive(Debug, Default)]
pub struct TryLock {
    locked: AtomicBool,
}

impl TryLock {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Take the lock if it is free. Released when the guard drops.
    pub fn try_lock(&self) -> Option<TryLockGuard<'_>> {
        self.locked
            .compare_exchange(false, true, Acquire, Relaxed)
            .ok()
            .map(|_| TryLockGuard { lock: self })
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Relaxed)
    }
}

#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct TryLockGuard<'a> {
    lock: &'a TryLock,
}

impl Drop for TryLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn second_acquire_fails_until_release() {
        let lock = TryLock::new();
        let guard = lock.try_lock().expect("free lock");
        assert!(lock.is_locked());
        assert!(lock.try_lock().is_none());
        drop(guard);
        assert!(!lock.is_locked());
        assert!(lock.try_lock().is_some());
    }

    #[test]
    fn contended_lock_admits_one_holder_at_a_time() {
        let lock = Arc::new(TryLock::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let entered = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lock = Arc::clone(&lock);
                let inside = Arc::clone(&inside);
                let entered = Arc::clone(&entered);
                thread::spawn(move || {
                    for _ in 0..10_000 {
                        if let Some(_guard) = lock.try_lock() {
                            assert_eq!(inside.fetch_add(1, Relaxed), 0);
                            entered.fetch_add(1, Relaxed);
                            inside.fetch_sub(1, Relaxed);
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(entered.load(Relaxed) > 0);
        assert!(!lock.is_locked());
    }
}
