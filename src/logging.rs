//! Tracing setup.
//!
//! The terminal belongs to the UI while it runs, so events go to a log file
//! instead of stderr. Filtering follows `RUST_LOG`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "typeahead.log";

/// `RUST_LOG` wins; otherwise `--debug` picks the verbosity.
fn default_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("typeahead=debug")
        } else {
            EnvFilter::new("typeahead=info")
        }
    })
}

/// Install the global subscriber writing to `directory/typeahead.log`.
///
/// Returns the path of the log file.
pub fn initialize(directory: &Path, debug: bool) -> Result<PathBuf> {
    fs::create_dir_all(directory)
        .with_context(|| format!("failed to create log directory {}", directory.display()))?;
    let path = directory.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(default_filter(debug))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(path)
}
