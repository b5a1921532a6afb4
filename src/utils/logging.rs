//! Diagnostic logging setup.
//!
//! The full-screen UI owns the terminal, so interactive sessions only log
//! when a file is given. One-shot commands log to stderr.

use std::error::Error;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Off,
    Stderr,
    File(PathBuf),
}

impl LogDestination {
    /// Interactive sessions default to silence; one-shot commands to stderr.
    pub fn choose(log_file: Option<PathBuf>, interactive: bool) -> Self {
        match log_file {
            Some(path) => LogDestination::File(path),
            None if interactive => LogDestination::Off,
            None => LogDestination::Stderr,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn open_log_file(path: &Path) -> Result<File, Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(destination: &LogDestination) -> Result<(), Box<dyn Error>> {
    match destination {
        LogDestination::Off => Ok(()),
        LogDestination::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| e.to_string().into()),
        LogDestination::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| e.to_string().into())
        }
    }
}
