//! Logging init: file under XDG state dir, or graceful fallback to stderr.

use anyhow::Result;
use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

fn open_log_file() -> Result<(File, PathBuf)> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("zdd")?;
    let log_dir = xdg_dirs.get_state_home().join("zdd");
    fs::create_dir_all(&log_dir)?;

    let path = log_dir.join("zdd.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    Ok((file, path))
}

/// Initialize structured logging to `~/.local/state/zdd/zdd.log`.
/// If the log dir is unwritable, logs go to stderr instead so the CLI still runs.
pub fn init_logging() {
    let (writer, log_path): (BoxMakeWriter, Option<PathBuf>) = match open_log_file() {
        Ok((file, path)) => (BoxMakeWriter::new(Arc::new(file)), Some(path)),
        Err(_) => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,zdd=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    match log_path {
        Some(path) => tracing::info!("zdd logging initialized at {}", path.display()),
        None => tracing::warn!("log dir unwritable, logging to stderr"),
    }
}
