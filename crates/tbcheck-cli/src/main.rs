//! tbcheck CLI - Command-line interface for Verilog device library checks
//!
//! This binary runs device test benches through Icarus Verilog and checks
//! the library's index and source formatting.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands};
use tbcheck_cli::commands;
use tbcheck_cli::commands::exec::ExecOptions;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Exec {
            root,
            no_dump,
            verbose,
            json,
        } => commands::exec::run(
            root.as_deref(),
            config,
            ExecOptions {
                no_dump,
                verbose,
                json,
            },
        ),
        Commands::Index { root, json } => commands::index::run(root.as_deref(), config, json),
        Commands::LineLengths { root, source, json } => {
            commands::line_lengths::run(root.as_deref(), source.as_deref(), config, json)
        }
        Commands::Doctor { root } => commands::doctor::run(root.as_deref(), config),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
