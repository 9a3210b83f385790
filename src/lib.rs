//! wifiwatchd - keep a wireless interface joined to a known network
//!
//! This library exposes the pieces the daemon binary wires together:
//! configuration parsing and reloading, the network backend capability,
//! scan-to-configuration matching, and the supervisor loop.

pub mod backend;
pub mod cli;
pub mod config;
pub mod constants;
pub mod daemon;
pub mod matcher;
pub mod supervisor;
