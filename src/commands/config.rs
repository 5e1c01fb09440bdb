//! Config command implementation.
//!
//! Generates configuration files in various formats.

use anyhow::Context;
use std::fs;
use std::path::PathBuf;

use crate::cli::ConfigFormat;
use crate::config::{render_config, Config};

/// Generates configuration files.
pub fn command_config(
    output: Option<PathBuf>,
    format: ConfigFormat,
    commented: bool,
) -> anyhow::Result<()> {
    let config = Config::default();
    let output = output.unwrap_or_else(|| PathBuf::from("ususpend.yaml"));

    let mut content = render_config(&config, &format)?;
    if commented && matches!(format, ConfigFormat::Yaml | ConfigFormat::Toml) {
        content = add_config_comments(content);
    }

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("✅ Configuration written to: {}", output.display());
    }

    Ok(())
}

/// Prepends a commented field reference. `#` starts a comment in YAML and TOML.
fn add_config_comments(body: String) -> String {
    let comments = r#"# ususpend Configuration
# =======================
#
# Relative paths are resolved against the directory of the ususpend binary.
#
# Inputs
# ------
# ignore_file: "ususpend.ignore.txt"  # One regex per line, matched against full command lines
# proc_root: "/proc"                  # procfs mount to enumerate
#
# Logging
# -------
# log_level: "info"                   # off, error, warn, info, debug, trace
# enable_file_logging: true           # Also append log lines to log_file
# log_file: "ususpend.txt"            # Log file path
# log_max_size_bytes: 10485760        # Log file is started over at this size
#
# Helper Scripts
# --------------
# generate_scripts: true              # Create resume.sh / suspend.sh when missing
# resume_script: "resume.sh"
# suspend_script: "suspend.sh"
# tty_session: 7                      # Virtual terminal of the desktop session
# tty_root: 1                         # Virtual terminal with a root console
"#;

    format!("{comments}\n{body}")
}
