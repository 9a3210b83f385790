//! Network backend abstraction
//!
//! The supervisor never talks to the platform directly; everything it
//! needs from the interface goes through [`NetworkBackend`]. This is the
//! one part of the system that varies across platforms (external
//! configuration tools vs. kernel interface calls), so it sits behind a
//! trait that also doubles as the mock seam for tests.

pub mod ifconfig;

use std::fmt;

use crate::config::NetworkEntry;

pub use ifconfig::IfconfigBackend;

/// Observed link/association state of the watched interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing observed yet; only valid before the first poll.
    Unknown,
    Up,
    Down,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkState::Unknown => "unknown",
            LinkState::Up => "up",
            LinkState::Down => "down",
        };
        f.write_str(name)
    }
}

/// Capability the supervisor needs from the platform: query link state,
/// list visible networks, join one.
///
/// Implementations absorb their own failures so the polling loop never
/// has to: a failed status query reports `Down` (fail-safe toward
/// re-scanning), a failed scan reports nothing visible, and a failed
/// connect is logged and left for the next poll cycle to retry
/// naturally. Calls may block; no timeout is enforced here, by design.
pub trait NetworkBackend {
    /// Current link state. Never reports `Unknown`; query failures are
    /// logged and reported as `Down`.
    fn status(&self) -> LinkState;

    /// SSIDs currently visible, in the order the platform reported
    /// them, duplicates preserved. Best effort: failures are logged and
    /// yield an empty list.
    fn scan(&self) -> Vec<String>;

    /// Ask the platform to associate with `entry` and acquire an
    /// address. Failures of either step are logged, not retried.
    fn connect(&self, entry: &NetworkEntry);
}

impl<B: NetworkBackend + ?Sized> NetworkBackend for &B {
    fn status(&self) -> LinkState {
        (**self).status()
    }

    fn scan(&self) -> Vec<String> {
        (**self).scan()
    }

    fn connect(&self, entry: &NetworkEntry) {
        (**self).connect(entry)
    }
}
