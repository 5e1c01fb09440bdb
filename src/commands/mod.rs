//! CLI command implementations for ususpend.
//!
//! This module provides implementations for the run modes and subcommands:
//! - `run`: `--resume` / `--suspend`
//! - `check`: System validation
//! - `config`: Configuration file generation
//! - `list`: Dry-run classification listing

pub mod check;
pub mod config;
pub mod list;
pub mod run;

// Re-export command functions
pub use check::command_check;
pub use config::command_config;
pub use list::command_list;
pub use run::command_run;
