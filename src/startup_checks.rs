//! Startup requirement validation for ususpend.
//!
//! This module validates that the tool runs on a supported platform and can
//! read the process table before any signal is sent.

use nix::unistd::geteuid;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Validate all runtime requirements
pub fn validate_requirements(proc_root: &Path) -> Result<(), ValidationError> {
    check_platform()?;
    check_user_privileges();
    check_proc_access(proc_root)?;
    Ok(())
}

/// Only Linux job-control semantics are supported.
pub fn check_platform() -> Result<(), ValidationError> {
    if cfg!(target_os = "linux") {
        Ok(())
    } else {
        error!("❌ This app can be used only on Linux.");
        Err(ValidationError::UnsupportedPlatform(std::env::consts::OS))
    }
}

/// Check if running with sufficient privileges. Returns true when root.
pub fn check_user_privileges() -> bool {
    if geteuid().is_root() {
        info!("✅ Running as root (uid=0)");
        true
    } else {
        warn!("⚠️  Not running as root - processes of other users cannot be signaled");
        warn!("   Recommendation: run with sudo");
        false
    }
}

/// Check that the process table can be listed.
pub fn check_proc_access(proc_root: &Path) -> Result<(), ValidationError> {
    match fs::read_dir(proc_root) {
        Ok(_) => {
            info!("✅ Process table readable at {}", proc_root.display());
            Ok(())
        }
        Err(e) => {
            error!("❌ Cannot read process table at {}: {}", proc_root.display(), e);
            Err(ValidationError::ProcessTableUnavailable(format!(
                "{}: {}",
                proc_root.display(),
                e
            )))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Unsupported platform '{0}', only Linux is supported")]
    UnsupportedPlatform(&'static str),

    #[error("Process table unavailable: {0}")]
    ProcessTableUnavailable(String),
}
