//! Logging setup for the terminal binary.
//!
//! The game owns stdout, so events go to a file or nowhere.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a global subscriber appending to `path`. Does nothing without a
/// path.
pub fn init(path: Option<&Path>, level: Level) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = open_log(path)?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .compact()
        .finish()
        .try_init()
        .context("installing log subscriber")?;
    Ok(())
}

fn open_log(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}
