//! File logging.
//!
//! The terminal belongs to the presentation, so log output goes to a file
//! under the user's cache directory. Nothing is recorded unless `-v` is given
//! or `RUST_LOG` is set.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const APP_DIR: &str = "termdeck";
const FILENAME: &str = "termdeck.log";

/// Install the global subscriber. Returns the log file path when logging is on.
pub fn init(verbose: u8) -> Result<Option<PathBuf>> {
    if verbose == 0 && std::env::var_os("RUST_LOG").is_none() {
        return Ok(None);
    }

    let path = dirs::cache_dir()
        .map(|d| d.join(APP_DIR).join(FILENAME))
        .context("Could not determine cache directory")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    build_subscriber(file, level_for(verbose)).try_init()?;
    Ok(Some(path))
}

fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// `RUST_LOG` directives win; `level` applies to everything else.
fn build_subscriber(log_file: File, level: Level) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}
