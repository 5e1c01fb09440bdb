//! Process classification into system, ignored and eligible processes.
//!
//! A process is a user process when at least one of its UIDs is at or above
//! [`MIN_USER_UID`]. User processes are then checked against the ignore list.

use crate::ignore::IgnoreList;
use std::fmt;

/// First UID handed out to human accounts.
pub const MIN_USER_UID: u32 = 1000;

/// Outcome of classifying one process snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Every UID is below the user threshold.
    System,
    /// A user process matched by an ignore rule.
    Ignored,
    /// A user process that will be signaled.
    Eligible,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::System => "system",
            Classification::Ignored => "ignored",
            Classification::Eligible => "eligible",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True if any UID belongs to a human account.
pub fn is_user_process(uids: &[u32]) -> bool {
    uids.iter().any(|&uid| uid >= MIN_USER_UID)
}

/// Classifies a process. The UID check runs first, so system processes are
/// never reported as ignored even when a rule matches them.
pub fn classify(uids: &[u32], cmdline: &str, ignore: &IgnoreList) -> Classification {
    if !is_user_process(uids) {
        return Classification::System;
    }
    if ignore.is_ignored(cmdline.trim()) {
        return Classification::Ignored;
    }
    Classification::Eligible
}
