//! Known-network configuration
//!
//! Handles parsing of the plain-text network list and reloading it from
//! disk. The file format is one record per network:
//!
//! ```text
//! <ssid> <association-args-to-end-of-line>
//! ```
//!
//! with no comments, quoting, or escaping. Parsing never fails on
//! malformed trailing content; it stops early with whatever complete
//! records were already read. Only a source that cannot be read at all
//! is an error.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The configuration source could not be opened or read.
///
/// Fatal at startup; on reload the previous configuration stays active.
#[derive(Debug, Error)]
#[error("could not read configuration file {path}: {source}")]
pub struct ConfigError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
}

/// One pre-approved network: an SSID plus the opaque argument string
/// handed to the association command. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEntry {
    ssid: String,
    args: String,
}

impl NetworkEntry {
    fn new(ssid: &str, args: &str) -> Self {
        Self {
            ssid: ssid.to_string(),
            args: args.to_string(),
        }
    }

    /// The network identifier, without embedded whitespace.
    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    /// Opaque association parameters, passed through to the backend.
    pub fn args(&self) -> &str {
        &self.args
    }
}

/// Ordered list of known networks in file order. Duplicates are allowed;
/// the first matching entry wins. Rebuilt wholesale on every (re)load
/// and never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Configuration {
    entries: Vec<NetworkEntry>,
}

impl Configuration {
    pub fn iter(&self) -> std::slice::Iter<'_, NetworkEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Configuration {
    type Item = &'a NetworkEntry;
    type IntoIter = std::slice::Iter<'a, NetworkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Parse the record format described in the module docs.
///
/// Left-to-right scan: skip leading whitespace, take the next maximal
/// non-whitespace run as the SSID, skip whitespace after it (newlines
/// included), then take everything up to the next newline as the
/// argument string. An SSID token with no argument run before
/// end-of-input is dropped rather than reported as an error.
pub fn parse(input: &str) -> Configuration {
    let mut entries = Vec::new();
    let mut rest = input.trim_start();
    while !rest.is_empty() {
        let Some(ssid_end) = rest.find(char::is_whitespace) else {
            // Dangling SSID token at end of input.
            break;
        };
        let ssid = &rest[..ssid_end];
        rest = rest[ssid_end..].trim_start();
        if rest.is_empty() {
            // SSID but no argument before end of input.
            break;
        }
        let args_end = rest.find('\n').unwrap_or(rest.len());
        entries.push(NetworkEntry::new(ssid, &rest[..args_end]));
        rest = rest[args_end..].trim_start();
    }
    Configuration { entries }
}

/// Handle on the configuration source, kept around so a reload request
/// can rebuild the active [`Configuration`] from the same path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the source. A file that is not valid UTF-8 counts
    /// as unreadable, since entries are held as strings.
    pub fn load(&self) -> Result<Configuration, ConfigError> {
        let text = fs::read_to_string(&self.path).map_err(|source| ConfigError {
            path: self.path.clone(),
            source,
        })?;
        Ok(parse(&text))
    }
}
