//! List command implementation.
//!
//! Classifies every process exactly like a run would, without signaling.

use std::path::Path;
use ususpend::{Classification, IgnoreList, ProcFs, SuspensionEngine};

use crate::config::Config;

/// Prints one line per process: pid, classification, command line.
pub fn command_list(all: bool, config: &Config, base: &Path) -> anyhow::Result<()> {
    let ignore_path = config.ignore_file_path(base);
    let ignore = if ignore_path.exists() {
        IgnoreList::from_file(&ignore_path)?
    } else {
        eprintln!(
            "⚠️  {} not found, listing without ignore rules",
            ignore_path.display()
        );
        IgnoreList::default()
    };

    let table = ProcFs::new(config.proc_root_path());
    let snapshots = SuspensionEngine::new(&table, &ignore).snapshot()?;

    let mut eligible = 0usize;
    let mut unreadable = 0usize;

    println!("{:>8}  {:<8}  COMMAND", "PID", "CLASS");
    for snapshot in snapshots {
        match snapshot {
            Ok(s) => {
                if s.classification == Classification::Eligible {
                    eligible += 1;
                }
                if s.classification == Classification::System && !all {
                    continue;
                }
                println!("{:>8}  {:<8}  {}", s.pid, s.classification, s.cmdline);
            }
            Err(e) => {
                unreadable += 1;
                if all {
                    println!("{:>8}  {:<8}  {}", "?", "error", e);
                }
            }
        }
    }

    println!(
        "\n{} eligible process(es), {} unreadable",
        eligible, unreadable
    );
    Ok(())
}
