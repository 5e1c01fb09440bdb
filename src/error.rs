//! Error types shared by the library modules.

use nix::errno::Errno;
use nix::sys::signal::Signal;
use std::path::PathBuf;

/// Errors raised while loading the ignore list.
///
/// Both variants are fatal: a run never starts with a partially loaded list.
#[derive(Debug, thiserror::Error)]
pub enum IgnoreError {
    #[error("cannot read ignore file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot compile ignore pattern on line {line} ({pattern}): {source}")]
    Pattern {
        line: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors raised while talking to the process table.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("cannot enumerate processes in {}: {source}", root.display())]
    Enumerate {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read {what} of pid {pid}: {source}")]
    Read {
        pid: i32,
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {what} of pid {pid}")]
    Parse { pid: i32, what: &'static str },

    #[error("cannot send {signal} to pid {pid}: {source}")]
    Signal {
        pid: i32,
        signal: Signal,
        #[source]
        source: Errno,
    },
}

impl ProcessError {
    /// True for the one error kind that aborts a whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessError::Enumerate { .. })
    }
}
