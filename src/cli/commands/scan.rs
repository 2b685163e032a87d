use std::path::{self, Path, PathBuf};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, ScanSummary};
use crate::{
    cli::{args::ScanCommand, exit_status::ExitStatus},
    config::{Config, ConfigLoadResult, load_config},
    core::{NuggetFinder, NuggetParser},
};

/// Run a full scan with settings merged from CLI args > config file > defaults.
///
/// Without `--project-dir`, the directory holding the config file (or the
/// current directory when there is none) is the project root.
pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let start_dir = cmd
        .common
        .project_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let ConfigLoadResult { mut config, path } = load_config(&start_dir)?;
    let project_dir = match (&cmd.common.project_dir, &path) {
        (None, Some(config_path)) => config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(start_dir),
        _ => start_dir,
    };

    apply_overrides(&mut config, &cmd)?;
    config.validate()?;

    let settings = config.resolve(&project_dir)?;
    let roots = settings.directories_to_scan.clone();
    let project_dir = settings.project_dir.clone();
    let parser = NuggetParser::new(config.tokens()).context("Invalid nugget tokens")?;
    let outcome = NuggetFinder::new(settings, Box::new(parser)).parse_all()?;

    let exit_status = if cmd.fail_empty && outcome.catalog.is_empty() {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    };

    Ok(CommandResult {
        summary: CommandSummary::Scan(ScanSummary {
            outcome,
            format: cmd.format,
            project_dir,
            roots,
            config_from_file: path.is_some(),
        }),
        exit_status,
    })
}

fn apply_overrides(config: &mut Config, cmd: &ScanCommand) -> Result<()> {
    if !cmd.paths.is_empty() {
        // CLI paths are relative to the working directory, not the project root.
        config.directories_to_scan = cmd
            .paths
            .iter()
            .map(|p| {
                path::absolute(p)
                    .map(|abs| abs.to_string_lossy().into_owned())
                    .with_context(|| format!("Invalid path: {:?}", p))
            })
            .collect::<Result<_>>()?;
    }
    if cmd.disable_references {
        config.disable_references = true;
    }
    if cmd.context_from_comment {
        config.message_context_enabled_from_comment = true;
    }
    if let Some(jobs) = cmd.jobs {
        config.jobs = Some(usize::from(jobs));
    }
    Ok(())
}
