//! Logging setup: console output plus an optional append-only log file.

use crate::cli::LogLevel;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

/// Opens the log file for appending, deleting it first if it has grown to
/// `max_size_bytes` or more.
pub fn open_log_file(path: &Path, max_size_bytes: u64) -> io::Result<File> {
    if let Ok(meta) = fs::metadata(path) {
        if meta.len() >= max_size_bytes {
            fs::remove_file(path)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Opens the optional log file. The error is the note printed on stderr
/// when the file cannot be used and logging stays on the console.
fn open_file_target(log_file: Option<(&Path, u64)>) -> Result<Option<File>, String> {
    let Some((path, max)) = log_file else {
        return Ok(None);
    };
    open_log_file(path, max).map(Some).map_err(|e| {
        format!(
            "Cannot open log file {}: {}, logging to console only",
            path.display(),
            e
        )
    })
}

/// Initializes tracing with a stdout layer and, when `log_file` is given,
/// a plain-text file layer. A log file that cannot be opened only costs the
/// file copy of the log.
pub fn setup_logging(level: LogLevel, log_file: Option<(&Path, u64)>) {
    let filter = level_filter(level);

    let console = fmt::layer()
        .with_writer(io::stdout)
        .with_target(false)
        .without_time();

    let (file, note) = match open_file_target(log_file) {
        Ok(file) => (file, None),
        Err(note) => (None, Some(note)),
    };
    let file_layer = file.map(|file| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init();

    if installed.is_err() {
        eprintln!("Tracing subscriber already installed");
        return;
    }

    if let Some(note) = note {
        eprintln!("{}", note);
    }

    info!("Logging initialized with level: {:?}", level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_open_log_file_appends_below_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ususpend.txt");
        fs::write(&path, "previous run\n").unwrap();

        let mut f = open_log_file(&path, 1024).unwrap();
        writeln!(f, "next run").unwrap();
        drop(f);

        assert_eq!(fs::read_to_string(&path).unwrap(), "previous run\nnext run\n");
    }

    #[test]
    fn test_open_log_file_starts_over_at_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ususpend.txt");
        fs::write(&path, "0123456789").unwrap();

        let mut f = open_log_file(&path, 10).unwrap();
        writeln!(f, "fresh").unwrap();
        drop(f);

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_open_log_file_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.txt");
        open_log_file(&path, 10).unwrap();
        assert!(path.exists());
    }

    // -------------------------------------------------------------------------
    // Tests for the file target fallback
    // -------------------------------------------------------------------------

    #[test]
    fn test_file_target_disabled() {
        assert!(matches!(open_file_target(None), Ok(None)));
    }

    #[test]
    fn test_file_target_opens_writable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ususpend.txt");
        let file = open_file_target(Some((&path, 1024))).unwrap();
        assert!(file.is_some());
        assert!(path.exists());
    }

    #[test]
    fn test_file_target_unopenable_falls_back_to_console() {
        let dir = TempDir::new().unwrap();
        // a regular file as parent directory fails even for root
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("ususpend.txt");

        let note = open_file_target(Some((&path, 1024))).unwrap_err();
        assert!(note.starts_with("Cannot open log file "));
        assert!(note.contains(&path.display().to_string()));
        assert!(note.ends_with(", logging to console only"));
        assert!(!path.exists());
    }
}
