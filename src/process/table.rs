//! Abstraction over the OS process table.
//!
//! The suspension engine only sees these traits, so a run can be driven
//! against `/proc` or against an in-memory table in tests.

use crate::error::ProcessError;
use nix::sys::signal::Signal;

/// One live process. Every accessor queries the OS afresh; nothing is cached.
pub trait ProcessHandle {
    fn pid(&self) -> i32;

    /// Real, effective, saved and filesystem UIDs.
    fn uids(&self) -> Result<Vec<u32>, ProcessError>;

    /// Full command line, arguments joined by single spaces. Empty for kernel threads.
    fn cmdline(&self) -> Result<String, ProcessError>;

    fn send_signal(&self, signal: Signal) -> Result<(), ProcessError>;
}

/// Source of process snapshots.
pub trait ProcessTable {
    type Process: ProcessHandle;

    /// Lists all currently visible processes. An error here aborts the run.
    fn processes(&self) -> Result<Vec<Self::Process>, ProcessError>;
}
