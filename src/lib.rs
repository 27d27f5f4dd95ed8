use std::fmt::Display;

use thiserror::Error;

pub mod job;
pub mod scheduling;
pub mod sync;

pub use scheduling::{
    clock::{Clock, ManualClock, SystemClock},
    heap::{Entry, EventHeap},
    timeline::Timeline,
};

/// Wrapper type for `std::io::Error`
#[derive(Debug, Error)]
pub struct IoError(std::io::Error);

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        IoError(err)
    }
}

impl PartialEq for IoError {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind() == other.0.kind()
    }
}

impl Eq for IoError {}
impl Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for all primitives
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimelineError {
    #[error("Heap is empty, nothing to peek or pop")]
    Empty,
    #[error("Index {index} out of range for heap of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("Periodic job frequency must be greater than zero")]
    ZeroFrequency,
    #[error("Periodic job thread panicked: {0}")]
    JobPanicked(String),
    #[error("I/O error while spawning job thread {:?}", err)]
    Io {
        #[from]
        err: IoError,
    },
}

impl From<std::io::Error> for TimelineError {
    fn from(err: std::io::Error) -> Self {
        TimelineError::Io { err: err.into() }
    }
}
