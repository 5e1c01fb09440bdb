//! Resume / suspend run.

use anyhow::Context;
use std::path::Path;
use tracing::info;
use ususpend::{Direction, IgnoreList, ProcFs, SuspensionEngine};

use crate::bootstrap::ensure_default_files;
use crate::config::Config;
use crate::startup_checks::validate_requirements;

/// Seeds default files, loads the ignore list and drives the engine.
///
/// Every setup step runs before the first signal; any setup failure aborts.
pub fn command_run(
    direction: Direction,
    config: &Config,
    base: &Path,
    exe: &Path,
) -> anyhow::Result<()> {
    let proc_root = config.proc_root_path();
    validate_requirements(&proc_root)?;

    ensure_default_files(config, base, exe)?;

    let ignore_path = config.ignore_file_path(base);
    let ignore = IgnoreList::from_file(&ignore_path)?;
    info!(
        "Loaded {} ignore rules from {}",
        ignore.len(),
        ignore_path.display()
    );

    let table = ProcFs::new(proc_root);
    let summary = SuspensionEngine::new(&table, &ignore)
        .run(direction)
        .with_context(|| format!("{} aborted", direction))?;

    let totals = summary.totals();
    info!(
        "Done: {} {} signal(s) sent, {} failed, {} ignored, {} system, {} unreadable over {} pass(es)",
        totals.signaled,
        summary.direction.signal(),
        totals.failed,
        totals.ignored,
        totals.system,
        totals.unresolved,
        summary.passes.len()
    );

    Ok(())
}
