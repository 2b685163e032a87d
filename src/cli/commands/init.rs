use std::{fs, path::Path};

use anyhow::{Context, Result, bail};

use super::{CommandResult, CommandSummary, InitSummary};
use crate::cli::exit_status::ExitStatus;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default config file into `dir`.
pub fn init(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(CommandResult {
        summary: CommandSummary::Init(InitSummary { path: config_path }),
        exit_status: ExitStatus::Success,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::config::load_config;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempdir().unwrap();

        let result = init(dir.path()).unwrap();

        assert_eq!(result.exit_status, ExitStatus::Success);
        let loaded = load_config(dir.path()).unwrap();
        assert!(loaded.from_file());
        assert_eq!(loaded.config.directories_to_scan, vec!["."]);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{}").unwrap();

        let err = init(dir.path()).unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(
            fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap(),
            "{}"
        );
    }
}
