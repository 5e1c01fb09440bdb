//! ususpend library
//!
//! Suspends or resumes every process owned by a human user on a Linux host by
//! sending `SIGSTOP` / `SIGCONT`. Processes are selected by UID (at or above
//! [`MIN_USER_UID`]) and filtered through an [`IgnoreList`] of regular
//! expressions matched against full command lines.
//!
//! # Usage
//!
//! ```no_run
//! use ususpend::{Direction, IgnoreList, ProcFs, SuspensionEngine};
//!
//! let ignore = IgnoreList::load([".*ususpend.*", ".*docker.*"]).unwrap();
//! let table = ProcFs::default();
//!
//! let summary = SuspensionEngine::new(&table, &ignore)
//!     .run(Direction::Suspend)
//!     .unwrap();
//! println!("stopped {} processes", summary.totals().signaled);
//! ```

pub mod engine;
pub mod error;
pub mod ignore;
pub mod process;

// Re-export main types for convenience
pub use engine::{
    pass_banner, Decision, Direction, PassSummary, ProcessSnapshot, RunSummary, SuspensionEngine,
};
pub use error::{IgnoreError, ProcessError};
pub use ignore::IgnoreList;
pub use process::{Classification, ProcFs, ProcessHandle, ProcessTable, MIN_USER_UID};
