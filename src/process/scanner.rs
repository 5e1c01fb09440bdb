//! Process scanning backed by the /proc filesystem.
//!
//! This module lists numeric entries under a proc root and reads owner UIDs
//! from `status` and the command line from `cmdline` on demand.

use crate::error::ProcessError;
use crate::process::table::{ProcessHandle, ProcessTable};
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::fs;
use std::path::{Path, PathBuf};

/// Default mount point of procfs.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Process entry representing a directory in /proc filesystem.
#[derive(Debug, Clone)]
pub struct ProcEntry {
    pub pid: i32,
    pub proc_path: PathBuf,
}

/// Process table read from a procfs mount.
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ProcessTable for ProcFs {
    type Process = ProcEntry;

    fn processes(&self) -> Result<Vec<ProcEntry>, ProcessError> {
        collect_proc_entries(&self.root)
    }
}

/// Scans a proc root for process entries with numeric PIDs.
///
/// Only failing to open the root is an error; entries that vanish while the
/// directory is being read are skipped.
pub fn collect_proc_entries(root: &Path) -> Result<Vec<ProcEntry>, ProcessError> {
    let entries = fs::read_dir(root).map_err(|source| ProcessError::Enumerate {
        root: root.to_path_buf(),
        source,
    })?;

    let mut out = Vec::new();
    for entry in entries.flatten() {
        let p = entry.path();
        let name = match p.file_name().and_then(|s| s.to_str()) {
            Some(v) => v,
            None => continue,
        };
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let pid: i32 = match name.parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        out.push(ProcEntry { pid, proc_path: p });
    }
    out.sort_by_key(|e| e.pid);
    Ok(out)
}

/// Extracts the UID list from the `Uid:` line of a status file.
pub fn parse_status_uids(status: &str) -> Option<Vec<u32>> {
    let line = status.lines().find(|l| l.starts_with("Uid:"))?;
    let uids: Result<Vec<u32>, _> = line["Uid:".len()..]
        .split_whitespace()
        .map(str::parse::<u32>)
        .collect();
    uids.ok().filter(|v| !v.is_empty())
}

/// Turns raw NUL-separated cmdline bytes into a space-joined string.
pub fn parse_cmdline(raw: &[u8]) -> String {
    raw.split(|&b| b == 0u8)
        .filter(|part| !part.is_empty())
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}

impl ProcessHandle for ProcEntry {
    fn pid(&self) -> i32 {
        self.pid
    }

    fn uids(&self) -> Result<Vec<u32>, ProcessError> {
        let status = fs::read_to_string(self.proc_path.join("status")).map_err(|source| {
            ProcessError::Read {
                pid: self.pid,
                what: "status",
                source,
            }
        })?;
        parse_status_uids(&status).ok_or(ProcessError::Parse {
            pid: self.pid,
            what: "uids",
        })
    }

    fn cmdline(&self) -> Result<String, ProcessError> {
        let raw = fs::read(self.proc_path.join("cmdline")).map_err(|source| ProcessError::Read {
            pid: self.pid,
            what: "cmdline",
            source,
        })?;
        Ok(parse_cmdline(&raw))
    }

    fn send_signal(&self, sig: Signal) -> Result<(), ProcessError> {
        signal::kill(Pid::from_raw(self.pid), sig).map_err(|source| ProcessError::Signal {
            pid: self.pid,
            signal: sig,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_proc(dir: &Path, pid: i32, uid_line: &str, cmdline: &[u8]) {
        let p = dir.join(pid.to_string());
        fs::create_dir_all(&p).unwrap();
        fs::write(
            p.join("status"),
            format!("Name:\tfake\nState:\tS (sleeping)\n{uid_line}\nGid:\t0\t0\t0\t0\n"),
        )
        .unwrap();
        fs::write(p.join("cmdline"), cmdline).unwrap();
    }

    // -------------------------------------------------------------------------
    // Tests for parsing helpers
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_status_uids() {
        let status = "Name:\tbash\nUid:\t1000\t1000\t1000\t1000\nGid:\t1000\t1000\t1000\t1000\n";
        assert_eq!(parse_status_uids(status), Some(vec![1000, 1000, 1000, 1000]));
    }

    #[test]
    fn test_parse_status_uids_missing_or_garbled() {
        assert_eq!(parse_status_uids("Name:\tbash\n"), None);
        assert_eq!(parse_status_uids("Uid:\tabc\t0\n"), None);
        assert_eq!(parse_status_uids("Uid:\n"), None);
    }

    #[test]
    fn test_parse_cmdline_joins_arguments() {
        assert_eq!(
            parse_cmdline(b"/usr/bin/ususpend\0--resume\0"),
            "/usr/bin/ususpend --resume"
        );
        assert_eq!(parse_cmdline(b"firefox"), "firefox");
        assert_eq!(parse_cmdline(b""), "");
    }

    // -------------------------------------------------------------------------
    // Tests for ProcFs against a fake proc root
    // -------------------------------------------------------------------------

    #[test]
    fn test_collect_proc_entries_skips_non_numeric() {
        let dir = TempDir::new().unwrap();
        fake_proc(dir.path(), 1, "Uid:\t0\t0\t0\t0", b"/sbin/init\0");
        fake_proc(dir.path(), 42, "Uid:\t1000\t1000\t1000\t1000", b"firefox\0");
        fs::create_dir_all(dir.path().join("self")).unwrap();
        fs::create_dir_all(dir.path().join("sys")).unwrap();
        fs::write(dir.path().join("uptime"), "1.0 1.0").unwrap();

        let entries = ProcFs::new(dir.path()).processes().unwrap();
        let pids: Vec<i32> = entries.iter().map(|e| e.pid).collect();
        assert_eq!(pids, vec![1, 42]);
    }

    #[test]
    fn test_entry_reads_uids_and_cmdline() {
        let dir = TempDir::new().unwrap();
        fake_proc(dir.path(), 42, "Uid:\t1000\t1000\t1000\t1000", b"firefox\0--private\0");

        let entries = ProcFs::new(dir.path()).processes().unwrap();
        let entry = &entries[0];
        assert_eq!(entry.uids().unwrap(), vec![1000, 1000, 1000, 1000]);
        assert_eq!(entry.cmdline().unwrap(), "firefox --private");
    }

    #[test]
    fn test_vanished_process_is_read_error() {
        let dir = TempDir::new().unwrap();
        fake_proc(dir.path(), 7, "Uid:\t1000\t1000\t1000\t1000", b"sleep\0");
        let entries = ProcFs::new(dir.path()).processes().unwrap();
        fs::remove_dir_all(dir.path().join("7")).unwrap();

        let err = entries[0].uids().unwrap_err();
        assert!(matches!(err, ProcessError::Read { pid: 7, .. }));
        assert!(!err.is_fatal());
        assert!(entries[0].cmdline().is_err());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let err = ProcFs::new("/nonexistent/proc-root").processes().unwrap_err();
        assert!(err.is_fatal());
    }
}
