pub mod init;
pub mod scan;

use std::path::PathBuf;

use super::{args::OutputFormat, exit_status::ExitStatus};
use crate::core::ScanOutcome;

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ScanSummary {
    pub outcome: ScanOutcome,
    pub format: OutputFormat,
    /// Base for the relative paths shown in verbose output.
    pub project_dir: PathBuf,
    /// Directories that were walked, for the success line.
    pub roots: Vec<PathBuf>,
    /// True if settings came from a config file rather than defaults.
    pub config_from_file: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running a nuggets command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub exit_status: ExitStatus,
}
