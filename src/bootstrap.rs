//! Creates default support files next to the executable on first use.
//!
//! Files that already exist are never touched, so user edits survive.

use crate::config::{Config, DEFAULT_TTY_ROOT, DEFAULT_TTY_SESSION};
use anyhow::Context;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tracing::info;

/// Default ignore list written when none exists.
pub const DEFAULT_IGNORE: &str = r"# processes to be ignored, by command line, line by line
#
# lines started with # will be ignored
# you can use regex
#
# example of ignored process by full command line
# /opt/google/chrome/chrome --type=renderer --crashpad-handler-pid=.* --enable-crash-reporter=.*

# do not touch ususpend
.*ususpend.*

# do not touch docker
.*docker.*

# sh scripts does not like suspending
^.*\.sh$
";

/// Template for the script that switches back to the desktop and resumes.
const RESUME_SH_TEMPLATE: &str = "# this will switch to {{tty_session}} terminal
# where you should have your X
# session and resume all the
# processes
sudo chvt {{tty_session}}
sudo {{exe_pathname}} --resume
";

/// Template for the script that switches to the root console and suspends.
const SUSPEND_SH_TEMPLATE: &str = "# this will switch to {{tty_root}} terminal
# where you should have your root
# session, and able to run resume.sh
# and then (after switch) will suspend
# all the processes
sudo chvt {{tty_root}}
sudo {{exe_pathname}} --suspend
";

/// Renders a helper script template.
pub fn render_script(template: &str, exe: &Path, tty_session: u8, tty_root: u8) -> String {
    template
        .replace("{{exe_pathname}}", &exe.to_string_lossy())
        .replace("{{tty_session}}", &tty_session.to_string())
        .replace("{{tty_root}}", &tty_root.to_string())
}

/// Writes `content` to `path` unless the file exists. Returns true if written.
pub fn ensure_file(path: &Path, content: &str, mode: u32) -> anyhow::Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    info!("{} does not exist, creating default.", path.display());
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
    info!("{} created.", path.display());

    Ok(true)
}

/// Seeds the ignore list and, if enabled, the helper scripts.
pub fn ensure_default_files(config: &Config, base: &Path, exe: &Path) -> anyhow::Result<()> {
    if config.generate_scripts.unwrap_or(true) {
        let tty_session = config.tty_session.unwrap_or(DEFAULT_TTY_SESSION);
        let tty_root = config.tty_root.unwrap_or(DEFAULT_TTY_ROOT);

        ensure_file(
            &config.resume_script_path(base),
            &render_script(RESUME_SH_TEMPLATE, exe, tty_session, tty_root),
            0o755,
        )?;
        ensure_file(
            &config.suspend_script_path(base),
            &render_script(SUSPEND_SH_TEMPLATE, exe, tty_session, tty_root),
            0o755,
        )?;
    }

    ensure_file(&config.ignore_file_path(base), DEFAULT_IGNORE, 0o644)?;
    Ok(())
}
