//! Polls a `Timeline` and dispatches fired events to a handler.
use std::sync::Arc;

use log::trace;

use super::periodic::{Periodic, PeriodicConfig, PeriodicHandle};
use crate::{scheduling::clock::Clock, sync::TryLock, Timeline, TimelineError};

/// Drains due events from a shared `Timeline` using `clock` as "now".
///
/// Overlapping sweeps do not queue up behind each other: a sweep that finds
/// another one in flight returns `None` right away.
pub struct Sweeper<T, C, H> {
    timeline: Arc<Timeline<T>>,
    clock: C,
    handler: H,
    busy: TryLock,
}

impl<T, C, H> Sweeper<T, C, H>
where
    C: Clock,
    H: Fn(T),
{
    pub fn new(timeline: Arc<Timeline<T>>, clock: C, handler: H) -> Self {
        Self {
            timeline,
            clock,
            handler,
            busy: TryLock::new(),
        }
    }

    pub fn timeline(&self) -> &Arc<Timeline<T>> {
        &self.timeline
    }

    /// Dispatch everything due by `clock.now()` in firing order. Returns the
    /// number dispatched, or `None` if a sweep was already running.
    pub fn sweep(&self) -> Option<usize> {
        let Some(_guard) = self.busy.try_lock() else {
            trace!("sweep already in progress, skipping");
            return None;
        };
        let fired = self.timeline.fired(self.clock.now());
        let count = fired.len();
        for event in fired {
            (self.handler)(event);
        }
        Some(count)
    }

    /// Time left until the closest pending event, zero if it is already due.
    pub fn until_next(&self) -> Option<i64> {
        let next = self.timeline.closest()?;
        Some(next.saturating_sub(self.clock.now()).max(0))
    }
}

impl<T, C, H> Sweeper<T, C, H>
where
    T: Send + 'static,
    C: Clock + 'static,
    H: Fn(T) + Send + Sync + 'static,
{
    /// Run `sweep` on every tick of a `Periodic` job.
    pub fn spawn(self: Arc<Self>, config: PeriodicConfig) -> Result<PeriodicHandle, TimelineError> {
        Periodic::new(
            move || {
                self.sweep();
            },
            config,
        )?
        .spawn()
    }
}
