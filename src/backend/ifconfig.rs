//! Backend that drives the BSD userland tools
//!
//! Queries the interface with `ifconfig <if>`, scans with
//! `ifconfig <if> scan`, and joins a network with
//! `ifconfig <if> nwid <ssid> <args...>` followed by `dhclient <if>`.
//! Commands are spawned with structured argv, never through a shell.

use std::process::Command;

use log::{error, warn};

use super::{LinkState, NetworkBackend};
use crate::config::NetworkEntry;

/// [`NetworkBackend`] implementation for one named interface.
#[derive(Debug, Clone)]
pub struct IfconfigBackend {
    interface: String,
}

impl IfconfigBackend {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
        }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Run a command to completion, logging a non-zero exit or a spawn
    /// failure. Used for the association/address-acquisition steps,
    /// where the next poll cycle is the retry path.
    fn run_action(&self, action: &str, command: &mut Command) {
        match command.status() {
            Ok(status) if status.success() => {}
            Ok(status) => error!("could not {} on {}: {}", action, self.interface, status),
            Err(err) => error!("could not {} on {}: {}", action, self.interface, err),
        }
    }
}

/// The link is up when the flags line (first output line of
/// `ifconfig <if>`) carries the UP flag.
fn parse_status(output: &str) -> LinkState {
    match output.lines().next() {
        Some(line) if line.contains("UP") => LinkState::Up,
        _ => LinkState::Down,
    }
}

/// Collect the token following each `nwid ` marker in scan output, in
/// output order.
fn parse_scan(output: &str) -> Vec<String> {
    let mut ssids = Vec::new();
    for line in output.lines() {
        if let Some(rest) = line.trim_start().strip_prefix("nwid ") {
            if let Some(ssid) = rest.split_whitespace().next() {
                ssids.push(ssid.to_string());
            }
        }
    }
    ssids
}

impl NetworkBackend for IfconfigBackend {
    fn status(&self) -> LinkState {
        let output = Command::new("ifconfig").arg(&self.interface).output();
        match output {
            Ok(out) if out.status.success() => {
                parse_status(&String::from_utf8_lossy(&out.stdout))
            }
            Ok(out) => {
                warn!("status query for {} failed: {}", self.interface, out.status);
                LinkState::Down
            }
            Err(err) => {
                warn!("could not query status of {}: {}", self.interface, err);
                LinkState::Down
            }
        }
    }

    fn scan(&self) -> Vec<String> {
        let output = Command::new("ifconfig")
            .arg(&self.interface)
            .arg("scan")
            .output();
        match output {
            Ok(out) if out.status.success() => {
                parse_scan(&String::from_utf8_lossy(&out.stdout))
            }
            Ok(out) => {
                warn!("scan on {} failed: {}", self.interface, out.status);
                Vec::new()
            }
            Err(err) => {
                warn!("could not scan {}: {}", self.interface, err);
                Vec::new()
            }
        }
    }

    fn connect(&self, entry: &NetworkEntry) {
        let mut associate = Command::new("ifconfig");
        associate
            .arg(&self.interface)
            .arg("nwid")
            .arg(entry.ssid());
        // The argument string is opaque to us, but the tool expects it
        // as separate argv words, split the way a shell would have.
        associate.args(entry.args().split_whitespace());
        self.run_action("associate", &mut associate);

        let mut acquire = Command::new("dhclient");
        acquire.arg(&self.interface);
        self.run_action("acquire an address", &mut acquire);
    }
}
