//! Global constants for wifiwatchd
//!
//! Centralized location for application-wide defaults

/// Interface watched when none is given on the command line
pub const DEFAULT_INTERFACE: &str = "iwm0";

/// Known-network list consulted when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/wireless.conf";

/// Seconds between polls while the link is up
pub const UP_POLL_SECS: u64 = 1;

/// Seconds to wait after starting an association so that it and the
/// address acquisition can settle before the link is checked again
pub const SETTLE_SECS: u64 = 10;

/// Seconds before re-scanning when nothing visible matched the
/// configuration
pub const RESCAN_SECS: u64 = 5;
