//! Configuration management for ususpend.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats. Relative paths
//! are resolved against the directory holding the executable, so the tool
//! behaves the same no matter where `sudo` was invoked from.

use crate::cli::{Args, ConfigFormat, LogLevel};
use anyhow::{bail, Context};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_IGNORE_FILE: &str = "ususpend.ignore.txt";
pub const DEFAULT_LOG_FILE: &str = "ususpend.txt";
pub const DEFAULT_LOG_MAX_SIZE_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_RESUME_SCRIPT: &str = "resume.sh";
pub const DEFAULT_SUSPEND_SCRIPT: &str = "suspend.sh";
pub const DEFAULT_TTY_SESSION: u8 = 7;
pub const DEFAULT_TTY_ROOT: u8 = 1;

/// Effective configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Inputs
    #[serde(alias = "ignore-file")]
    pub ignore_file: Option<PathBuf>,
    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,

    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,
    #[serde(alias = "enable-file-logging")]
    pub enable_file_logging: Option<bool>,
    #[serde(alias = "log-file")]
    pub log_file: Option<PathBuf>,
    /// Log file is removed and started over once it reaches this size
    #[serde(alias = "log-max-size-bytes")]
    pub log_max_size_bytes: Option<u64>,

    // Helper scripts
    #[serde(alias = "generate-scripts")]
    pub generate_scripts: Option<bool>,
    #[serde(alias = "resume-script")]
    pub resume_script: Option<PathBuf>,
    #[serde(alias = "suspend-script")]
    pub suspend_script: Option<PathBuf>,
    /// Virtual terminal running the desktop session
    #[serde(alias = "tty-session")]
    pub tty_session: Option<u8>,
    /// Virtual terminal with the root console used while suspended
    #[serde(alias = "tty-root")]
    pub tty_root: Option<u8>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_file: Some(PathBuf::from(DEFAULT_IGNORE_FILE)),
            proc_root: Some(PathBuf::from(ususpend::process::DEFAULT_PROC_ROOT)),
            log_level: Some("info".into()),
            enable_file_logging: Some(true),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            log_max_size_bytes: Some(DEFAULT_LOG_MAX_SIZE_BYTES),
            generate_scripts: Some(true),
            resume_script: Some(PathBuf::from(DEFAULT_RESUME_SCRIPT)),
            suspend_script: Some(PathBuf::from(DEFAULT_SUSPEND_SCRIPT)),
            tty_session: Some(DEFAULT_TTY_SESSION),
            tty_root: Some(DEFAULT_TTY_ROOT),
        }
    }
}

impl Config {
    pub fn ignore_file_path(&self, base: &Path) -> PathBuf {
        resolve_relative(base, self.ignore_file.as_deref(), DEFAULT_IGNORE_FILE)
    }

    pub fn log_file_path(&self, base: &Path) -> PathBuf {
        resolve_relative(base, self.log_file.as_deref(), DEFAULT_LOG_FILE)
    }

    pub fn resume_script_path(&self, base: &Path) -> PathBuf {
        resolve_relative(base, self.resume_script.as_deref(), DEFAULT_RESUME_SCRIPT)
    }

    pub fn suspend_script_path(&self, base: &Path) -> PathBuf {
        resolve_relative(base, self.suspend_script.as_deref(), DEFAULT_SUSPEND_SCRIPT)
    }

    /// CLI level if given, else the configured one, else `info`.
    pub fn effective_log_level(&self, cli: Option<LogLevel>) -> LogLevel {
        cli.or_else(|| {
            self.log_level
                .as_deref()
                .and_then(|s| LogLevel::from_str(s, true).ok())
        })
        .unwrap_or(LogLevel::Info)
    }

    pub fn proc_root_path(&self) -> PathBuf {
        self.proc_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(ususpend::process::DEFAULT_PROC_ROOT))
    }
}

/// Joins `path` (or `default`) onto `base` unless it is already absolute.
pub fn resolve_relative(base: &Path, path: Option<&Path>, default: &str) -> PathBuf {
    let p = path.unwrap_or_else(|| Path::new(default));
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

/// Absolute path of the running executable.
pub fn exe_path() -> PathBuf {
    env::current_exe()
        .or_else(|_| env::args().next().map(PathBuf::from).ok_or(()))
        .map(|p| p.canonicalize().unwrap_or(p))
        .unwrap_or_else(|_| PathBuf::from("ususpend"))
}

/// Directory relative paths are resolved against.
pub fn base_dir() -> PathBuf {
    exe_path()
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.log_max_size_bytes == Some(0) {
        bail!("log_max_size_bytes must be greater than 0");
    }

    for (name, tty) in [("tty_session", cfg.tty_session), ("tty_root", cfg.tty_root)] {
        if let Some(n) = tty {
            if !(1..=63).contains(&n) {
                bail!("Invalid {} {}, expected a virtual terminal between 1 and 63", name, n);
            }
        }
    }

    if let Some(level) = cfg.log_level.as_deref() {
        match level {
            "off" | "error" | "warn" | "info" | "debug" | "trace" => {}
            other => bail!(
                "Invalid log_level '{}', expected off, error, warn, info, debug or trace",
                other
            ),
        }
    }

    if cfg.proc_root.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
        bail!("proc_root must not be empty");
    }
    if cfg.ignore_file.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
        bail!("ignore_file must not be empty");
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args, base: &Path) -> anyhow::Result<Config> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref(), base)?
    };

    if let Some(ignore_file) = &args.ignore_file {
        config.ignore_file = Some(ignore_file.clone());
    }
    if let Some(log_file) = &args.log_file {
        config.log_file = Some(log_file.clone());
    }
    if args.no_log_file {
        config.enable_file_logging = Some(false);
    }
    if args.no_scripts {
        config.generate_scripts = Some(false);
    }

    Ok(config)
}

/// Loads a config file in any supported format.
///
/// Without an explicit path the system-wide location is tried first, then
/// the executable's directory. No file found means defaults.
pub fn load_config(path: Option<&Path>, base: &Path) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                bail!("Config file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let mut candidates: Vec<PathBuf> = [
                "/etc/ususpend/ususpend.yaml",
                "/etc/ususpend/ususpend.yml",
                "/etc/ususpend/ususpend.json",
            ]
            .iter()
            .map(PathBuf::from)
            .collect();
            candidates.extend(
                ["ususpend.yaml", "ususpend.yml", "ususpend.json"]
                    .iter()
                    .map(|name| base.join(name)),
            );

            match candidates.into_iter().find(|p| p.exists()) {
                Some(p) => p,
                None => return Ok(Config::default()),
            }
        }
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?,
        _ => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?,
    };
    info!("Loaded configuration from: {}", path.display());

    Ok(merge_defaults(config))
}

/// Fills unset fields from [`Config::default`].
fn merge_defaults(cfg: Config) -> Config {
    let d = Config::default();
    Config {
        ignore_file: cfg.ignore_file.or(d.ignore_file),
        proc_root: cfg.proc_root.or(d.proc_root),
        log_level: cfg.log_level.or(d.log_level),
        enable_file_logging: cfg.enable_file_logging.or(d.enable_file_logging),
        log_file: cfg.log_file.or(d.log_file),
        log_max_size_bytes: cfg.log_max_size_bytes.or(d.log_max_size_bytes),
        generate_scripts: cfg.generate_scripts.or(d.generate_scripts),
        resume_script: cfg.resume_script.or(d.resume_script),
        suspend_script: cfg.suspend_script.or(d.suspend_script),
        tty_session: cfg.tty_session.or(d.tty_session),
        tty_root: cfg.tty_root.or(d.tty_root),
    }
}

/// Renders configuration in the requested format
pub fn render_config(config: &Config, format: &ConfigFormat) -> anyhow::Result<String> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: &ConfigFormat) -> anyhow::Result<()> {
    println!("{}", render_config(config, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_effective_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut cfg = Config::default();
        cfg.tty_session = Some(0);
        assert!(validate_effective_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.log_max_size_bytes = Some(0);
        assert!(validate_effective_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.log_level = Some("loud".into());
        assert!(validate_effective_config(&cfg).is_err());
    }

    #[test]
    fn test_relative_paths_resolve_against_base() {
        let cfg = Config::default();
        let base = Path::new("/opt/ususpend");
        assert_eq!(
            cfg.ignore_file_path(base),
            PathBuf::from("/opt/ususpend/ususpend.ignore.txt")
        );

        let cfg = Config {
            log_file: Some(PathBuf::from("/var/log/ususpend.log")),
            ..Config::default()
        };
        assert_eq!(cfg.log_file_path(base), PathBuf::from("/var/log/ususpend.log"));
    }

    #[test]
    fn test_log_level_precedence() {
        let cfg = Config {
            log_level: Some("debug".into()),
            ..Config::default()
        };
        assert!(matches!(cfg.effective_log_level(None), LogLevel::Debug));
        assert!(matches!(
            cfg.effective_log_level(Some(LogLevel::Warn)),
            LogLevel::Warn
        ));

        let cfg = Config {
            log_level: None,
            ..Config::default()
        };
        assert!(matches!(cfg.effective_log_level(None), LogLevel::Info));
    }

    #[test]
    fn test_load_yaml_merges_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ususpend.yaml");
        fs::write(&path, "ignore-file: /etc/ususpend/ignore.txt\ntty_session: 2\n").unwrap();

        let cfg = load_config(Some(&path), dir.path()).unwrap();
        assert_eq!(cfg.ignore_file, Some(PathBuf::from("/etc/ususpend/ignore.txt")));
        assert_eq!(cfg.tty_session, Some(2));
        assert_eq!(cfg.tty_root, Some(DEFAULT_TTY_ROOT));
        assert_eq!(cfg.log_max_size_bytes, Some(DEFAULT_LOG_MAX_SIZE_BYTES));
    }

    #[test]
    fn test_load_json_and_toml() {
        let dir = TempDir::new().unwrap();

        let json = dir.path().join("c.json");
        fs::write(&json, r#"{"generate_scripts": false}"#).unwrap();
        let cfg = load_config(Some(&json), dir.path()).unwrap();
        assert_eq!(cfg.generate_scripts, Some(false));

        let toml_path = dir.path().join("c.toml");
        fs::write(&toml_path, "enable_file_logging = false\n").unwrap();
        let cfg = load_config(Some(&toml_path), dir.path()).unwrap();
        assert_eq!(cfg.enable_file_logging, Some(false));
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(Some(&dir.path().join("nope.yaml")), dir.path()).is_err());
    }

    #[test]
    fn test_rendered_config_round_trips_through_yaml() {
        let rendered = render_config(&Config::default(), &ConfigFormat::Yaml).unwrap();
        let parsed: Config = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(parsed.ignore_file, Some(PathBuf::from(DEFAULT_IGNORE_FILE)));
    }
}
