//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Walk the project and print every nugget found
//! - `init`: Initialize nuggets configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Scan(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root; relative references and config paths start here
    #[arg(long, env = "NUGGETS_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable, grouped by source file
    #[default]
    Text,
    /// The catalog as a JSON object keyed by message key
    Json,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Directories to scan (overrides `directoriesToScan` in the config file)
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Do not record where each nugget occurs
    #[arg(long)]
    pub disable_references: bool,

    /// Treat nugget comments as message context
    #[arg(long)]
    pub context_from_comment: bool,

    /// Number of worker threads (default: one per CPU)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Exit with status 1 when no nuggets are found
    #[arg(long)]
    pub fail_empty: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan source files for nuggets and print the template catalog
    Scan(ScanCommand),
    /// Initialize a new .nuggetrc.json configuration file
    Init,
}
