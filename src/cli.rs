//! CLI arguments and subcommands for ususpend.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use ususpend::Direction;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "ususpend",
    about = "Suspend or resume non-system (users) processes.",
    long_about = "Suspend or resume non-system (users) processes.\n\n\
                  Sends SIGSTOP (--suspend) or SIGCONT (--resume) to every process owned by \
                  a UID >= 1000 whose command line matches no rule of the ignore list. \
                  Needs root to signal other users' processes.",
    version,
    propagate_version = true,
    group(ArgGroup::new("mode").args(["resume", "suspend"]).multiple(false))
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Resume all non-system processes
    #[arg(long)]
    pub resume: bool,

    /// Suspend all non-system processes
    #[arg(long)]
    pub suspend: bool,

    /// Log level [default: info]
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Ignore-list file (one regular expression per line)
    #[arg(short = 'i', long)]
    pub ignore_file: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log to the console only
    #[arg(long)]
    pub no_log_file: bool,

    /// Do not create resume.sh / suspend.sh helper scripts
    #[arg(long)]
    pub no_scripts: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,
}

impl Args {
    /// Direction selected by `--resume` / `--suspend`, if any.
    pub fn direction(&self) -> Option<Direction> {
        if self.resume {
            Some(Direction::Resume)
        } else if self.suspend {
            Some(Direction::Suspend)
        } else {
            None
        }
    }
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate platform, privileges, process table access and ignore list
    Check,

    /// Generate configuration files
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,

        /// Include comments and examples
        #[arg(long)]
        commented: bool,
    },

    /// Show how every process would be classified, without sending signals
    List {
        /// Also show system processes
        #[arg(long)]
        all: bool,
    },
}
