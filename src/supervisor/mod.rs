//! The polling control loop and the signal flags that steer it
//!
//! One thread runs the loop: poll link state, scan and join when the
//! link is down, swap in a fresh configuration when a reload was
//! requested. Signal handlers only raise one-bit flags; the loop reads
//! them between cycles, so termination latency is bounded by the
//! longest sleep. That bound is a deliberate trade-off, not a bug.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};

use crate::backend::{LinkState, NetworkBackend};
use crate::config::{ConfigStore, Configuration};
use crate::constants::{RESCAN_SECS, SETTLE_SECS, UP_POLL_SECS};
use crate::matcher::{self, MatchPolicy};

/// One-bit requests delivered from signal context.
///
/// Handlers only store into these; the supervisor thread is the only
/// reader. Each flag is idempotent to re-raise, so relaxed single-word
/// atomics are all the synchronization needed.
#[derive(Debug, Clone, Default)]
pub struct SignalFlags {
    terminate: Arc<AtomicBool>,
    reload: Arc<AtomicBool>,
}

impl SignalFlags {
    /// Bare flags, not hooked to any signal. Raised manually in tests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hook SIGINT/SIGTERM to the terminate flag and SIGHUP to the
    /// reload flag. No other work happens in signal context.
    pub fn register() -> Result<Self> {
        let flags = Self::new();
        signal_hook::flag::register(SIGINT, flags.terminate.clone())
            .context("could not register SIGINT handler")?;
        signal_hook::flag::register(SIGTERM, flags.terminate.clone())
            .context("could not register SIGTERM handler")?;
        signal_hook::flag::register(SIGHUP, flags.reload.clone())
            .context("could not register SIGHUP handler")?;
        Ok(flags)
    }

    pub fn should_exit(&self) -> bool {
        self.terminate.load(Ordering::Relaxed)
    }

    pub fn request_exit(&self) {
        self.terminate.store(true, Ordering::Relaxed);
    }

    /// Read and clear the reload request.
    pub fn take_reload(&self) -> bool {
        self.reload.swap(false, Ordering::Relaxed)
    }

    pub fn request_reload(&self) {
        self.reload.store(true, Ordering::Relaxed);
    }
}

/// Sleep lengths for the three loop outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    /// Link is up; check again soon.
    pub up_poll: Duration,
    /// An association was just started; let it settle.
    pub settle: Duration,
    /// Nothing to join; scan again after a medium back-off.
    pub rescan: Duration,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            up_poll: Duration::from_secs(UP_POLL_SECS),
            settle: Duration::from_secs(SETTLE_SECS),
            rescan: Duration::from_secs(RESCAN_SECS),
        }
    }
}

/// The control loop over one backend and one configuration source.
pub struct Supervisor<B> {
    backend: B,
    store: ConfigStore,
    config: Configuration,
    policy: MatchPolicy,
    intervals: Intervals,
    last_state: LinkState,
}

impl<B: NetworkBackend> Supervisor<B> {
    /// Build a supervisor around an already-loaded configuration.
    /// Loading it up front keeps startup failure fatal while reload
    /// failure stays survivable.
    pub fn new(backend: B, store: ConfigStore, config: Configuration, policy: MatchPolicy) -> Self {
        Self {
            backend,
            store,
            config,
            policy,
            intervals: Intervals::default(),
            last_state: LinkState::Unknown,
        }
    }

    /// Override the sleep lengths. Tests run with millisecond values.
    pub fn with_intervals(mut self, intervals: Intervals) -> Self {
        self.intervals = intervals;
        self
    }

    /// The currently active configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Run until the terminate flag is raised. The flag is re-checked
    /// after every sleep, before the next backend call is issued.
    pub fn run(&mut self, signals: &SignalFlags) {
        while !signals.should_exit() {
            if signals.take_reload() {
                self.reload();
            }
            let delay = self.cycle();
            thread::sleep(delay);
        }
    }

    /// Rebuild the configuration from its source. When the source has
    /// become unreadable the current configuration stays active; the
    /// request is consumed either way so the loop never spins on a bad
    /// file.
    fn reload(&mut self) {
        match self.store.load() {
            Ok(fresh) => {
                info!("configuration reloaded: {} networks", fresh.len());
                self.config = fresh;
            }
            Err(err) => warn!("reload failed, keeping previous configuration: {err}"),
        }
    }

    /// One poll cycle; returns how long to sleep before the next.
    fn cycle(&mut self) -> Duration {
        match self.backend.status() {
            LinkState::Up => {
                self.observe(LinkState::Up);
                self.intervals.up_poll
            }
            // Unknown never comes out of a backend, but failing toward
            // a scan is the safe reading if one misbehaves.
            LinkState::Down | LinkState::Unknown => {
                self.observe(LinkState::Down);
                let visible = self.backend.scan();
                match matcher::select(&visible, &self.config, self.policy) {
                    Some(entry) => {
                        info!("joining network {}", entry.ssid());
                        self.backend.connect(entry);
                        self.intervals.settle
                    }
                    None => self.intervals.rescan,
                }
            }
        }
    }

    /// Record the observed link state, logging only on an actual
    /// change. The initial state is `Unknown`, so whatever is observed
    /// first always logs. Returns whether a transition was logged.
    fn observe(&mut self, state: LinkState) -> bool {
        if self.last_state == state {
            return false;
        }
        info!("link is {state}");
        self.last_state = state;
        true
    }
}
