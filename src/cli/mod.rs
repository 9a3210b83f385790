//! CLI argument parsing and validation module
//!
//! Handles the command-line surface using clap:
//! - Interface selection
//! - Configuration file path
//! - Foreground vs. daemon mode and pidfile
//! - Match policy selection
//! - Help and version commands

use anyhow::{anyhow, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use crate::constants::{DEFAULT_CONFIG_PATH, DEFAULT_INTERFACE};
use crate::matcher::MatchPolicy;

/// Parsed command-line surface.
#[derive(Debug, Clone)]
pub struct Options {
    /// Wireless interface to watch.
    pub interface: String,
    /// Path of the known-network list.
    pub config_path: PathBuf,
    /// Detach from the terminal instead of running in the foreground.
    pub daemonize: bool,
    /// Where to record the process id, if anywhere.
    pub pidfile: Option<PathBuf>,
    /// Which ordering wins when several visible networks are known.
    pub policy: MatchPolicy,
}

fn build_command() -> Command {
    Command::new("wifiwatchd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Keep a wireless interface associated with a known network")
        .long_about(
            "A small daemon that polls the link state of a wireless interface. \
             When the link is down it scans for visible networks, matches them \
             against an ordered list of known networks, and invokes the system \
             tools to associate and obtain an address.",
        )
        .arg(
            Arg::new("interface")
                .short('i')
                .long("interface")
                .value_name("IF")
                .help("Wireless interface to watch")
                .default_value(DEFAULT_INTERFACE),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Known-network list, one '<ssid> <args>' record per line")
                .default_value(DEFAULT_CONFIG_PATH),
        )
        .arg(
            Arg::new("daemon")
                .short('d')
                .long("daemon")
                .help("Detach from the terminal and run in the background")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pidfile")
                .short('p')
                .long("pidfile")
                .value_name("PATH")
                .help("Record the process id at PATH"),
        )
        .arg(
            Arg::new("prefer")
                .long("prefer")
                .value_name("ORDER")
                .help("Tie-break between visible known networks: scan order or config order")
                .value_parser(["scan", "config"])
                .default_value("scan"),
        )
}

/// Parse command line arguments and return the daemon options.
pub fn parse_args() -> Result<Options> {
    options_from(&build_command().get_matches())
}

fn options_from(matches: &ArgMatches) -> Result<Options> {
    let interface = matches
        .get_one::<String>("interface")
        .cloned()
        .unwrap_or_else(|| DEFAULT_INTERFACE.to_string());
    if interface.is_empty() {
        return Err(anyhow!("interface name must not be empty"));
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let policy = match matches.get_one::<String>("prefer").map(String::as_str) {
        Some("config") => MatchPolicy::ConfigOrder,
        _ => MatchPolicy::ScanOrder,
    };

    Ok(Options {
        interface,
        config_path,
        daemonize: matches.get_flag("daemon"),
        pidfile: matches.get_one::<String>("pidfile").map(PathBuf::from),
        policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Options {
        let matches = build_command().try_get_matches_from(argv).unwrap();
        options_from(&matches).unwrap()
    }

    #[test]
    fn defaults_match_the_documented_surface() {
        let options = parse(&["wifiwatchd"]);
        assert_eq!(options.interface, DEFAULT_INTERFACE);
        assert_eq!(options.config_path, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!options.daemonize);
        assert!(options.pidfile.is_none());
        assert_eq!(options.policy, MatchPolicy::ScanOrder);
    }

    #[test]
    fn all_flags_are_honored() {
        let options = parse(&[
            "wifiwatchd",
            "-i",
            "iwx0",
            "-c",
            "/tmp/wireless.conf",
            "-d",
            "-p",
            "/run/wifiwatchd.pid",
            "--prefer",
            "config",
        ]);
        assert_eq!(options.interface, "iwx0");
        assert_eq!(options.config_path, PathBuf::from("/tmp/wireless.conf"));
        assert!(options.daemonize);
        assert_eq!(options.pidfile, Some(PathBuf::from("/run/wifiwatchd.pid")));
        assert_eq!(options.policy, MatchPolicy::ConfigOrder);
    }

    #[test]
    fn unknown_prefer_value_is_rejected() {
        let result = build_command().try_get_matches_from(["wifiwatchd", "--prefer", "alphabetical"]);
        assert!(result.is_err());
    }

    #[test]
    fn empty_interface_is_rejected() {
        let matches = build_command()
            .try_get_matches_from(["wifiwatchd", "-i", ""])
            .unwrap();
        assert!(options_from(&matches).is_err());
    }
}
