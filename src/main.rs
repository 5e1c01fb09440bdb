//! ususpend - version 0.1.0
//!
//! Suspend or resume non-system (users) processes.
//! This is the main entry point that parses arguments, prepares config and
//! logging, and dispatches to the run mode or a subcommand.

mod bootstrap;
mod cli;
mod commands;
mod config;
mod logging;
mod startup_checks;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{error, info};

use cli::{Args, Commands};
use commands::{command_check, command_config, command_list, command_run};
use config::{
    base_dir, exe_path, resolve_config, show_config, validate_effective_config,
    DEFAULT_LOG_MAX_SIZE_BYTES,
};

const APP_NAME: &str = "USUSPEND";

/// Parses arguments with the exit codes of the tool: 0 for help and
/// version output, 1 for anything clap rejects.
fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let base = base_dir();
    let exe = exe_path();

    if args.show_config || args.check_config {
        let config = resolve_config(&args, &base)?;

        if args.check_config {
            if let Err(e) = validate_effective_config(&config) {
                eprintln!("❌ Configuration invalid: {}", e);
                std::process::exit(1);
            }
            println!("✅ Configuration is valid");
            return Ok(());
        }

        return show_config(&config, &args.config_format);
    }

    if let Some(command) = &args.command {
        if let Commands::Config {
            output,
            format,
            commented,
        } = command
        {
            return command_config(output.clone(), format.clone(), *commented);
        }

        let config = resolve_config(&args, &base)?;
        validate_effective_config(&config)?;

        return match command {
            Commands::Check => command_check(&config, &base),
            Commands::List { all } => command_list(*all, &config, &base),
            Commands::Config { .. } => unreachable!("Config handled above"),
        };
    }

    let Some(direction) = args.direction() else {
        let _ = Args::command().print_help();
        std::process::exit(1);
    };

    let config = resolve_config(&args, &base)?;
    validate_effective_config(&config)?;

    let log_file = config.log_file_path(&base);
    let log_max = config
        .log_max_size_bytes
        .unwrap_or(DEFAULT_LOG_MAX_SIZE_BYTES);
    let file_target = config
        .enable_file_logging
        .unwrap_or(true)
        .then_some((log_file.as_path(), log_max));
    logging::setup_logging(config.effective_log_level(args.log_level), file_target);

    info!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
    info!("Suspend or resume non-system (users) processes.");

    command_run(direction, &config, &base, &exe)
}

/// Main application entry point.
fn main() {
    let args = parse_args();

    if let Err(e) = run(args) {
        if tracing::dispatcher::has_been_set() {
            error!("{:#}", e);
        } else {
            eprintln!("❌ {:#}", e);
        }
        std::process::exit(1);
    }
}
