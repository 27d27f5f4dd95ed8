//! Background jobs that drive scheduling primitives on their own threads.
//!
//! `Periodic` runs an action on a fixed tick, and `Sweeper` uses it to drain a
//! `Timeline` and dispatch whatever has fired.
pub mod periodic;
pub mod sweeper;

pub use periodic::{Periodic, PeriodicConfig, PeriodicHandle};
pub use sweeper::Sweeper;
