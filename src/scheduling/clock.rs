//! Sources of "now" for consumers that drain a `Timeline`.
use std::sync::atomic::{AtomicI64, Ordering::SeqCst};
use std::time::{SystemTime, UNIX_EPOCH};

/// Anything that can report the current instant on a `Timeline`'s time axis.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall clock in milliseconds since the UNIX epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
            // clock set before 1970
            Err(before) => -i64::try_from(before.duration().as_millis()).unwrap_or(i64::MAX),
        }
    }
}

/// Manually driven clock, for deterministic sweeps.
#[derive(Debug, Default)]
pub struct ManualClock {
    time: AtomicI64,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            time: AtomicI64::new(start),
        }
    }

    pub fn set(&self, time: i64) {
        self.time.store(time, SeqCst);
    }

    /// Move forward by `delta`, saturating at the ends of `i64`. Returns the
    /// new instant.
    pub fn advance(&self, delta: i64) -> i64 {
        let step = |time: i64| Some(time.saturating_add(delta));
        match self.time.fetch_update(SeqCst, SeqCst, step) {
            Ok(prev) | Err(prev) => prev.saturating_add(delta),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.time.load(SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> i64 {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now(), 100);
        assert_eq!(clock.advance(25), 125);
        assert_eq!(clock.now(), 125);
        clock.set(-5);
        assert_eq!(clock.now(), -5);
    }

    #[test]
    fn manual_clock_saturates_at_bounds() {
        let clock = ManualClock::new(i64::MAX - 1);
        assert_eq!(clock.advance(10), i64::MAX);
        assert_eq!(clock.now(), i64::MAX);
        clock.set(i64::MIN + 1);
        assert_eq!(clock.advance(-10), i64::MIN);
        assert_eq!(clock.now(), i64::MIN);
    }

    #[test]
    fn system_clock_is_past_2020() {
        // 2020-01-01T00:00:00Z in milliseconds
        assert!(SystemClock.now() > 1_577_836_800_000);
    }
}
