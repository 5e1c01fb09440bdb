//! Process-related modules for enumeration and classification.
//!
//! This module provides:
//! - `table`: traits the suspension engine drives
//! - `scanner`: the /proc backed process table
//! - `classifier`: system / ignored / eligible decision

pub mod classifier;
pub mod scanner;
pub mod table;

// Re-export commonly used types
pub use classifier::{classify, is_user_process, Classification, MIN_USER_UID};
pub use scanner::{
    collect_proc_entries, parse_cmdline, parse_status_uids, ProcEntry, ProcFs, DEFAULT_PROC_ROOT,
};
pub use table::{ProcessHandle, ProcessTable};
