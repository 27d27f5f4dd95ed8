//! Fixed-interval job runner on a dedicated thread.
use std::any::Any;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::TimelineError;

type Action = Box<dyn FnMut() + Send + 'static>;
type OnStop = Box<dyn FnOnce() + Send + 'static>;

/// Tick settings for a `Periodic` job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicConfig {
    pub frequency: Duration,
    pub run_immediately: bool,
    pub name: Option<String>,
}

impl Default for PeriodicConfig {
    fn default() -> Self {
        Self {
            frequency: Duration::from_secs(1),
            run_immediately: false,
            name: None,
        }
    }
}

impl PeriodicConfig {
    pub fn every(frequency: Duration) -> Self {
        Self {
            frequency,
            ..Self::default()
        }
    }

    /// Also run the action once before the first tick.
    pub fn run_immediately(mut self, yes: bool) -> Self {
        self.run_immediately = yes;
        self
    }

    /// Name given to the job thread.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// An action to run once per `frequency` until stopped.
pub struct Periodic {
    action: Action,
    on_stop: Option<OnStop>,
    config: PeriodicConfig,
}

impl Periodic {
    pub fn new<F>(action: F, config: PeriodicConfig) -> Result<Self, TimelineError>
    where
        F: FnMut() + Send + 'static,
    {
        if config.frequency.is_zero() {
            return Err(TimelineError::ZeroFrequency);
        }
        Ok(Self {
            action: Box::new(action),
            on_stop: None,
            config,
        })
    }

    /// Callback run once on the job thread after the tick loop exits.
    pub fn on_stop<F>(mut self, on_stop: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_stop = Some(Box::new(on_stop));
        self
    }

    pub fn config(&self) -> &PeriodicConfig {
        &self.config
    }

    /// Start ticking on a new thread.
    pub fn spawn(self) -> Result<PeriodicHandle, TimelineError> {
        let name = self
            .config
            .name
            .clone()
            .unwrap_or_else(|| "periodic-job".to_string());
        let (stop, stopped) = mpsc::channel();
        let thread = thread::Builder::new()
            .name(name.clone())
            .spawn(move || self.run(stopped))?;
        info!("periodic job {name} started");
        Ok(PeriodicHandle {
            name,
            stop,
            thread: Some(thread),
        })
    }

    fn run(mut self, stopped: Receiver<()>) {
        let frequency = self.config.frequency;
        if self.config.run_immediately {
            (self.action)();
        }

        let mut next = Instant::now().checked_add(frequency);
        loop {
            let signal = match next {
                Some(at) => stopped.recv_timeout(at.saturating_duration_since(Instant::now())),
                // next tick is past what `Instant` can represent, only a stop can arrive
                None => stopped.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };
            match signal {
                Err(RecvTimeoutError::Timeout) => {
                    (self.action)();
                    // ticks missed while the action ran are dropped
                    let now = Instant::now();
                    next = next.and_then(|at| at.checked_add(frequency));
                    while let Some(at) = next.filter(|at| *at <= now) {
                        next = at.checked_add(frequency);
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        if let Some(on_stop) = self.on_stop.take() {
            on_stop();
        }
    }
}

/// Owner of a running `Periodic` job. Dropping it stops the job.
#[derive(Debug)]
pub struct PeriodicHandle {
    name: String,
    stop: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl PeriodicHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signal the job and wait for it to finish, including its `on_stop`.
    pub fn stop(mut self) -> Result<(), TimelineError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<(), TimelineError> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        // the receiver is gone if the job thread already died
        let _ = self.stop.send(());
        match thread.join() {
            Ok(()) => {
                info!("periodic job {} stopped", self.name);
                Ok(())
            }
            Err(panic) => {
                let msg = panic_message(panic.as_ref());
                warn!("periodic job {} panicked: {msg}", self.name);
                Err(TimelineError::JobPanicked(msg))
            }
        }
    }
}

impl Drop for PeriodicHandle {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        return s.to_string();
    }
    if let Some(s) = panic.downcast_ref::<String>() {
        return s.clone();
    }
    "unknown panic payload".to_string()
}
