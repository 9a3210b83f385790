#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use log::info;

use wifiwatchd::backend::IfconfigBackend;
use wifiwatchd::cli;
use wifiwatchd::config::ConfigStore;
use wifiwatchd::daemon;
use wifiwatchd::supervisor::{SignalFlags, Supervisor};

fn main() -> Result<()> {
    let options = cli::parse_args()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // A daemon with no networks to watch for is useless, so a missing
    // or unreadable list at startup is fatal. Reload failures later are
    // not: the supervisor keeps the previous configuration.
    let store = ConfigStore::new(options.config_path.clone());
    let config = store
        .load()
        .context("could not load configuration at startup")?;
    info!(
        "watching {} with {} known networks from {}",
        options.interface,
        config.len(),
        store.path().display()
    );

    if options.daemonize {
        daemon::detach()?;
    }
    if let Some(ref pidfile) = options.pidfile {
        daemon::write_pidfile(pidfile)?;
    }

    let signals = SignalFlags::register().context("could not install signal handlers")?;

    let backend = IfconfigBackend::new(options.interface.clone());
    let mut supervisor = Supervisor::new(backend, store, config, options.policy);
    supervisor.run(&signals);

    info!("terminating");
    if let Some(ref pidfile) = options.pidfile {
        daemon::remove_pidfile(pidfile);
    }

    Ok(())
}
