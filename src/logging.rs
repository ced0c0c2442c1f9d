//! File logging setup.
//!
//! The core logs through `tracing`; the embedding frontend calls
//! [`init`] once at startup to send everything to
//! `~/.tabterm/tabterm.log`. Without a home directory or a writable
//! log file the application simply runs unlogged.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Initialize file logging (append mode, no ANSI, INFO level).
pub fn init() -> anyhow::Result<()> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from);

    let log_path = home
        .map(|h| h.join(".tabterm").join("tabterm.log"))
        .unwrap_or_else(|| PathBuf::from("tabterm.log"));

    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    else {
        return Ok(());
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("tabterm {} logging to {}", env!("CARGO_PKG_VERSION"), log_path.display());
    Ok(())
}
