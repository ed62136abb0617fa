// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! Logging-related utilities

use std::{fs, io};
use std::path::{Path, PathBuf};

use chrono::Local;
use directories::ProjectDirs;
use tracing::warn;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

const MAXIMUM_LOG_FILES: usize = 50;
static LOG_DIR_NAME: &str = "logs";

/// Filter used when the operator doesn't pass `--log-filter`. Each `-v` widens it.
pub fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        // I get info, everything else gets warn
        0 => "warn,rotary_panel=info",
        // my debug logging, the HTTP stack's info logging
        1 => "warn,hyper=info,rotary_panel=debug",
        2 => "info,hyper=debug,rotary_panel=trace",
        3 => "debug",
        _ => "trace",
    }
}

pub fn init_console_logging(log_filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        .finish()
        .init()
}

/// Log into a fresh timestamped file. Falls back to the console if the log directory is unusable.
pub fn try_init_file_logging(log_filter: EnvFilter) -> Option<WorkerGuard> {
    match create_log_dir_path() {
        Ok(log_dir_path) => {
            let file_appender = tracing_appender::rolling::never(log_dir_path, log_file_name());
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            init_file_logging(log_filter, non_blocking);
            Some(guard)
        }
        Err(e) => {
            init_console_logging(log_filter);
            warn!("File-based logging failed. Falling back to stdout: {e}");
            None
        }
    }
}

fn init_file_logging(log_filter: EnvFilter, non_blocking: NonBlocking) {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_env_filter(log_filter)
        .finish()
        .init();
}

fn log_file_name() -> String {
    Local::now().format("%Y-%m-%d_%H-%M-%S.log").to_string()
}

fn log_dir() -> io::Result<PathBuf> {
    ProjectDirs::from("io.github", "rotary-panel", env!("CARGO_PKG_NAME"))
        .map(|dirs| dirs.data_dir().join(LOG_DIR_NAME))
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "unable to locate data directory"))
}

fn create_log_dir_path() -> io::Result<PathBuf> {
    let log_dir_path = log_dir()?;
    fs::create_dir_all(log_dir_path.as_path())?;
    clean_up_old_logs(log_dir_path.as_path())?;
    Ok(log_dir_path)
}

/// Deletes the oldest `.log` files so that at most [MAXIMUM_LOG_FILES] remain.
fn clean_up_old_logs(path: &Path) -> io::Result<()> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(path)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "log") {
            paths.push(path);
        }
    }
    // timestamped names sort chronologically
    paths.sort_unstable();
    if let Some(logs_to_delete) = paths.len().checked_sub(MAXIMUM_LOG_FILES) {
        for path in paths.into_iter().take(logs_to_delete) {
            fs::remove_file(path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rotary-panel-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn presets_parse() {
        for verbose in 0..6 {
            assert!(EnvFilter::try_new(verbosity_filter(verbose)).is_ok(), "preset {verbose}");
        }
    }

    #[test]
    fn old_logs_are_removed() {
        let dir = scratch_dir("logs");
        for i in 0..(MAXIMUM_LOG_FILES + 3) {
            fs::write(dir.join(format!("2024-01-01_00-00-{i:02}.log")), "").unwrap();
        }
        fs::write(dir.join("notes.txt"), "").unwrap();

        clean_up_old_logs(&dir).unwrap();

        let remaining: Vec<_> = fs::read_dir(&dir).unwrap().map(|entry| entry.unwrap().file_name()).collect();
        assert_eq!(remaining.len(), MAXIMUM_LOG_FILES + 1);
        assert!(!dir.join("2024-01-01_00-00-00.log").exists());
        assert!(!dir.join("2024-01-01_00-00-02.log").exists());
        assert!(dir.join("2024-01-01_00-00-03.log").exists());
        assert!(dir.join("notes.txt").exists());

        fs::remove_dir_all(dir).unwrap();
    }
}
