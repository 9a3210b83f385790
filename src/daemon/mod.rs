//! Background-mode plumbing
//!
//! Detaching from the controlling terminal and pidfile handling. These
//! are setup steps: a failure here is fatal and exits non-zero, unlike
//! the steady-state failures the supervisor absorbs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

/// Detach from the controlling terminal, daemon(3)-style: chdir to /
/// and redirect stdio to /dev/null.
pub fn detach() -> Result<()> {
    nix::unistd::daemon(false, false).context("could not detach from the controlling terminal")
}

/// Record our process id for service managers. Written after any
/// detach, so the recorded pid is the daemon's own.
pub fn write_pidfile(path: &Path) -> Result<()> {
    fs::write(path, format!("{}\n", std::process::id()))
        .with_context(|| format!("could not write pidfile {}", path.display()))
}

/// Best-effort cleanup at shutdown.
pub fn remove_pidfile(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        warn!("could not remove pidfile {}: {}", path.display(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pidfile_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wifiwatchd.pid");

        write_pidfile(&path).unwrap();
        let recorded: u32 = fs::read_to_string(&path).unwrap().trim().parse().unwrap();
        assert_eq!(recorded, std::process::id());

        remove_pidfile(&path);
        assert!(!path.exists());
    }

    #[test]
    fn pidfile_in_a_missing_directory_fails() {
        let path = Path::new("/nonexistent/dir/wifiwatchd.pid");
        assert!(write_pidfile(path).is_err());
    }
}
