//! Time-ordered scheduling primitives.
//!
//! `EventHeap` is the single-threaded binary min-heap keyed by firing time, and
//! `Timeline` wraps it behind one exclusive lock so producers and consumers on
//! different threads can schedule, poll, drain and cancel events safely.
pub mod clock;
pub mod heap;
pub mod timeline;
