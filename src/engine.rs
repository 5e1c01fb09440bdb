//! Suspension engine: walks the process table and stops or continues every
//! eligible user process.
//!
//! Each pass enumerates the table afresh. Per-process failures are logged and
//! skipped; only a failed enumeration aborts the run. Resume always runs two
//! full passes because a process whose parent was still stopped when it got
//! `SIGCONT` may stay stopped until it is signaled again.

use crate::error::ProcessError;
use crate::ignore::IgnoreList;
use crate::process::{classify, Classification, ProcessHandle, ProcessTable};
use nix::sys::signal::Signal;
use std::fmt;
use tracing::{debug, info, warn};

/// Which way to move user processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Resume,
    Suspend,
}

impl Direction {
    pub fn signal(&self) -> Signal {
        match self {
            Direction::Resume => Signal::SIGCONT,
            Direction::Suspend => Signal::SIGSTOP,
        }
    }

    /// Verb used in log lines.
    pub fn verb(&self) -> &'static str {
        match self {
            Direction::Resume => "resume",
            Direction::Suspend => "suspend",
        }
    }

    /// Number of full enumerate-and-signal passes.
    pub fn passes(&self) -> usize {
        match self {
            Direction::Resume => 2,
            Direction::Suspend => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Point-in-time view of one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSnapshot {
    pub pid: i32,
    pub uids: Vec<u32>,
    /// Whitespace-trimmed command line.
    pub cmdline: String,
    pub classification: Classification,
}

/// What one pass did with one process. `Display` gives the log line.
#[derive(Debug)]
pub enum Decision {
    /// The running tool itself, skipped by PID.
    OwnProcess { cmdline: String },
    System { cmdline: String },
    Ignored { cmdline: String },
    Signaled { direction: Direction, cmdline: String },
    SignalFailed { cmdline: String, error: ProcessError },
}

impl Decision {
    pub fn cmdline(&self) -> &str {
        match self {
            Decision::OwnProcess { cmdline }
            | Decision::System { cmdline }
            | Decision::Ignored { cmdline }
            | Decision::Signaled { cmdline, .. }
            | Decision::SignalFailed { cmdline, .. } => cmdline,
        }
    }

    fn record(&self, summary: &mut PassSummary) {
        match self {
            Decision::OwnProcess { .. } | Decision::Ignored { .. } => summary.ignored += 1,
            Decision::System { .. } => summary.system += 1,
            Decision::Signaled { .. } => summary.signaled += 1,
            Decision::SignalFailed { .. } => summary.failed += 1,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::OwnProcess { cmdline } => write!(f, "ignore {} [self]", cmdline),
            Decision::System { cmdline } => write!(f, "ignore {} [system]", cmdline),
            Decision::Ignored { cmdline } => write!(f, "ignore {}", cmdline),
            Decision::Signaled { direction, cmdline } => {
                write!(f, "{} {}", direction.verb(), cmdline)
            }
            Decision::SignalFailed { cmdline, error } => {
                write!(f, "cannot send signal to {}: {}", cmdline, error)
            }
        }
    }
}

/// Banner logged before pass `pass` (1-based), if the direction has one.
pub fn pass_banner(direction: Direction, pass: usize) -> Option<String> {
    match (direction, pass) {
        (Direction::Resume, 1) => Some("Resume for the first time...".to_string()),
        (Direction::Resume, 2) => Some("Resume for the second time...".to_string()),
        _ => None,
    }
}

/// Counters for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub system: usize,
    pub ignored: usize,
    pub signaled: usize,
    pub failed: usize,
    pub unresolved: usize,
}

impl PassSummary {
    pub fn total(&self) -> usize {
        self.system + self.ignored + self.signaled + self.failed + self.unresolved
    }
}

/// Result of a whole run, one entry per pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub direction: Direction,
    pub passes: Vec<PassSummary>,
}

impl RunSummary {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            passes: Vec::with_capacity(direction.passes()),
        }
    }

    /// Sum of the per-pass counters.
    pub fn totals(&self) -> PassSummary {
        self.passes.iter().fold(PassSummary::default(), |mut acc, p| {
            acc.system += p.system;
            acc.ignored += p.ignored;
            acc.signaled += p.signaled;
            acc.failed += p.failed;
            acc.unresolved += p.unresolved;
            acc
        })
    }
}

/// Drives job-control signals over a process table.
pub struct SuspensionEngine<'a, T: ProcessTable> {
    table: &'a T,
    ignore: &'a IgnoreList,
    own_pid: Option<i32>,
}

impl<'a, T: ProcessTable> SuspensionEngine<'a, T> {
    pub fn new(table: &'a T, ignore: &'a IgnoreList) -> Self {
        Self {
            table,
            ignore,
            own_pid: i32::try_from(std::process::id()).ok(),
        }
    }

    /// Overrides the PID treated as "this process". `None` disables the check.
    pub fn with_own_pid(mut self, pid: Option<i32>) -> Self {
        self.own_pid = pid;
        self
    }

    /// Runs all passes for `direction`.
    pub fn run(&self, direction: Direction) -> Result<RunSummary, ProcessError> {
        let mut summary = RunSummary::new(direction);

        for pass in 1..=direction.passes() {
            if let Some(banner) = pass_banner(direction, pass) {
                info!("{}", banner);
            }
            summary.passes.push(self.run_pass(direction)?);
        }

        Ok(summary)
    }

    /// One enumerate-and-signal pass.
    pub fn run_pass(&self, direction: Direction) -> Result<PassSummary, ProcessError> {
        let processes = self.table.processes()?;
        debug!("Enumerated {} processes", processes.len());

        let mut summary = PassSummary::default();

        for process in &processes {
            let decision = match self.decide(process, direction) {
                Ok(d) => d,
                Err(e) => {
                    warn!("{}", e);
                    summary.unresolved += 1;
                    continue;
                }
            };

            match decision {
                Decision::SignalFailed { .. } => warn!("{}", decision),
                _ => info!("{}", decision),
            }
            decision.record(&mut summary);
        }

        debug!(
            "Pass done: {} signaled, {} failed, {} system, {} ignored, {} unresolved",
            summary.signaled, summary.failed, summary.system, summary.ignored, summary.unresolved
        );
        Ok(summary)
    }

    /// Resolves, classifies and, for an eligible process, signals it.
    ///
    /// `Err` means the process could not be resolved and nothing was sent.
    pub fn decide(
        &self,
        process: &T::Process,
        direction: Direction,
    ) -> Result<Decision, ProcessError> {
        if Some(process.pid()) == self.own_pid {
            let cmdline = process
                .cmdline()
                .map(|c| c.trim().to_string())
                .unwrap_or_else(|_| format!("pid {}", process.pid()));
            return Ok(Decision::OwnProcess { cmdline });
        }

        let snapshot = self.inspect(process)?;
        let cmdline = snapshot.cmdline;

        Ok(match snapshot.classification {
            Classification::System => Decision::System { cmdline },
            Classification::Ignored => Decision::Ignored { cmdline },
            Classification::Eligible => match process.send_signal(direction.signal()) {
                Ok(()) => Decision::Signaled { direction, cmdline },
                Err(error) => Decision::SignalFailed { cmdline, error },
            },
        })
    }

    /// Classifies every process without signaling anything.
    ///
    /// The outer error is a failed enumeration; inner errors are per-process
    /// lookups that would be skipped by a real run.
    pub fn snapshot(&self) -> Result<Vec<Result<ProcessSnapshot, ProcessError>>, ProcessError> {
        let processes = self.table.processes()?;
        Ok(processes
            .iter()
            .filter(|p| Some(p.pid()) != self.own_pid)
            .map(|p| self.inspect(p))
            .collect())
    }

    fn inspect(&self, process: &T::Process) -> Result<ProcessSnapshot, ProcessError> {
        let uids = process.uids()?;
        let cmdline = process.cmdline()?.trim().to_string();
        let classification = classify(&uids, &cmdline, self.ignore);

        Ok(ProcessSnapshot {
            pid: process.pid(),
            uids,
            cmdline,
            classification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::errno::Errno;

    #[test]
    fn test_direction_signals_and_passes() {
        assert_eq!(Direction::Resume.signal(), Signal::SIGCONT);
        assert_eq!(Direction::Suspend.signal(), Signal::SIGSTOP);
        assert_eq!(Direction::Resume.passes(), 2);
        assert_eq!(Direction::Suspend.passes(), 1);
    }

    // -------------------------------------------------------------------------
    // Tests for decision log lines
    // -------------------------------------------------------------------------

    #[test]
    fn test_decision_rendering() {
        let cmd = || "firefox".to_string();

        assert_eq!(
            Decision::System { cmdline: cmd() }.to_string(),
            "ignore firefox [system]"
        );
        assert_eq!(Decision::Ignored { cmdline: cmd() }.to_string(), "ignore firefox");
        assert_eq!(
            Decision::OwnProcess { cmdline: cmd() }.to_string(),
            "ignore firefox [self]"
        );
        assert_eq!(
            Decision::Signaled {
                direction: Direction::Resume,
                cmdline: cmd()
            }
            .to_string(),
            "resume firefox"
        );
        assert_eq!(
            Decision::Signaled {
                direction: Direction::Suspend,
                cmdline: cmd()
            }
            .to_string(),
            "suspend firefox"
        );
    }

    #[test]
    fn test_signal_failed_rendering() {
        let decision = Decision::SignalFailed {
            cmdline: "firefox --private".to_string(),
            error: ProcessError::Signal {
                pid: 400,
                signal: Signal::SIGSTOP,
                source: Errno::EPERM,
            },
        };

        let line = decision.to_string();
        assert!(line.starts_with("cannot send signal to firefox --private: "));
        assert!(line.contains("SIGSTOP"));
        assert!(line.contains("pid 400"));
        assert_eq!(decision.cmdline(), "firefox --private");
    }

    #[test]
    fn test_decision_counters() {
        let mut summary = PassSummary::default();
        let cmd = || "x".to_string();
        Decision::OwnProcess { cmdline: cmd() }.record(&mut summary);
        Decision::Ignored { cmdline: cmd() }.record(&mut summary);
        Decision::System { cmdline: cmd() }.record(&mut summary);
        Decision::SignalFailed {
            cmdline: cmd(),
            error: ProcessError::Signal {
                pid: 1,
                signal: Signal::SIGCONT,
                source: Errno::ESRCH,
            },
        }
        .record(&mut summary);

        assert_eq!(summary.ignored, 2);
        assert_eq!(summary.system, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.signaled, 0);
    }

    #[test]
    fn test_pass_banners() {
        assert_eq!(
            pass_banner(Direction::Resume, 1).as_deref(),
            Some("Resume for the first time...")
        );
        assert_eq!(
            pass_banner(Direction::Resume, 2).as_deref(),
            Some("Resume for the second time...")
        );
        assert_eq!(pass_banner(Direction::Suspend, 1), None);
    }

    #[test]
    fn test_run_summary_totals() {
        let summary = RunSummary {
            direction: Direction::Resume,
            passes: vec![
                PassSummary {
                    system: 1,
                    ignored: 2,
                    signaled: 1,
                    failed: 0,
                    unresolved: 0,
                },
                PassSummary {
                    system: 1,
                    ignored: 2,
                    signaled: 0,
                    failed: 1,
                    unresolved: 1,
                },
            ],
        };
        let totals = summary.totals();
        assert_eq!(totals.signaled, 1);
        assert_eq!(totals.failed, 1);
        assert_eq!(totals.total(), 9);
    }
}
