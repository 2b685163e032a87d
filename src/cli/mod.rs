use std::{path::Path, process::ExitCode};

use anyhow::Result;

pub mod args;
pub mod commands;
pub mod exit_status;
pub mod report;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

use commands::{CommandResult, init::init, scan::scan};

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitCode::SUCCESS);
    };

    let result = run(args)?;
    report::print(&result, verbose);

    Ok(result.exit_status.into())
}

/// Dispatch to the command handler for the parsed arguments.
fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Init) => init(Path::new(".")),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
