//! Small synchronization primitives used around the scheduler.
pub mod try_lock;

pub use try_lock::{TryLock, TryLockGuard};
