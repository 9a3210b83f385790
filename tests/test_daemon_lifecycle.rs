//! End-to-end lifecycle test: start the daemon in the foreground over a
//! real configuration file, then terminate it with SIGTERM.
//!
//! The watched interface does not exist on the test host, so every
//! status query fails toward Down and every scan comes back empty; the
//! daemon just idles through its back-off sleeps. Termination is
//! honored at the next cycle boundary, so the wait below allows for one
//! full rescan sleep.

use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use assert_cmd::cargo::cargo_bin;
use tempfile::TempDir;

#[test]
fn sigterm_stops_the_daemon_with_exit_code_zero() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("wireless.conf");
    let pidfile_path = dir.path().join("wifiwatchd.pid");
    std::fs::write(&config_path, "home supersecret\nwork nwid2 key2\n").unwrap();

    let mut child = Command::new(cargo_bin("wifiwatchd"))
        .arg("-i")
        .arg("testwlan0")
        .arg("-c")
        .arg(&config_path)
        .arg("-p")
        .arg(&pidfile_path)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // Give it time to start up and write the pidfile.
    std::thread::sleep(Duration::from_millis(500));
    let recorded: u32 = std::fs::read_to_string(&pidfile_path)
        .unwrap()
        .trim()
        .parse()
        .unwrap();
    assert_eq!(recorded, child.id());

    unsafe {
        libc::kill(child.id() as libc::pid_t, libc::SIGTERM);
    }

    // Bounded termination latency: at most one full back-off sleep.
    let deadline = Instant::now() + Duration::from_secs(15);
    let status = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break status;
        }
        if Instant::now() >= deadline {
            child.kill().unwrap();
            panic!("daemon did not exit after SIGTERM");
        }
        std::thread::sleep(Duration::from_millis(50));
    };

    assert!(status.success(), "expected exit code 0, got {status}");
    assert!(!pidfile_path.exists(), "pidfile should be removed on shutdown");

    let stderr = {
        use std::io::Read;
        let mut buf = String::new();
        child.stderr.take().unwrap().read_to_string(&mut buf).unwrap();
        buf
    };
    assert!(
        stderr.contains("watching testwlan0"),
        "startup log line missing from stderr: {stderr}"
    );
}
