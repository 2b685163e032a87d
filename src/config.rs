use std::{
    fs,
    path::{self, Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::{Pattern, glob};
use serde::{Deserialize, Serialize};

use crate::core::{NuggetTokens, ScanSettings};
use crate::utils::normalize_path;

pub const CONFIG_FILE_NAME: &str = ".nuggetrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_directories_to_scan")]
    pub directories_to_scan: Vec<String>,
    #[serde(default = "default_white_list")]
    pub white_list: Vec<String>,
    #[serde(default)]
    pub black_list: Vec<String>,
    #[serde(default)]
    pub disable_references: bool,
    #[serde(default)]
    pub message_context_enabled_from_comment: bool,
    #[serde(default = "default_begin_token")]
    pub nugget_begin_token: String,
    #[serde(default = "default_end_token")]
    pub nugget_end_token: String,
    #[serde(default = "default_delimiter_token")]
    pub nugget_delimiter_token: String,
    #[serde(default = "default_comment_token")]
    pub nugget_comment_token: String,
    /// Worker threads used for extraction. Unset means one per CPU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

fn default_directories_to_scan() -> Vec<String> {
    vec![".".to_string()]
}

fn default_white_list() -> Vec<String> {
    ["*.cs", "*.cshtml", "*.js", "*.ts", "*.vb", "*.vbhtml"]
        .map(String::from)
        .to_vec()
}

fn default_begin_token() -> String {
    NuggetTokens::default().begin
}

fn default_end_token() -> String {
    NuggetTokens::default().end
}

fn default_delimiter_token() -> String {
    NuggetTokens::default().delimiter
}

fn default_comment_token() -> String {
    NuggetTokens::default().comment
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directories_to_scan: default_directories_to_scan(),
            white_list: default_white_list(),
            black_list: Vec::new(),
            disable_references: false,
            message_context_enabled_from_comment: false,
            nugget_begin_token: default_begin_token(),
            nugget_end_token: default_end_token(),
            nugget_delimiter_token: default_delimiter_token(),
            nugget_comment_token: default_comment_token(),
            jobs: None,
        }
    }
}

/// Check if a pattern contains glob wildcards (* or ?).
/// Directory entries without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for empty nugget tokens, malformed `*.ext` whitelist
    /// entries or invalid glob patterns in `directoriesToScan`.
    pub fn validate(&self) -> Result<()> {
        let tokens = [
            ("nuggetBeginToken", &self.nugget_begin_token),
            ("nuggetEndToken", &self.nugget_end_token),
            ("nuggetDelimiterToken", &self.nugget_delimiter_token),
            ("nuggetCommentToken", &self.nugget_comment_token),
        ];
        for (name, token) in tokens {
            if token.is_empty() {
                bail!("'{}' must not be empty", name);
            }
        }

        for item in &self.white_list {
            if let Some(ext) = item.strip_prefix("*.") {
                if ext.is_empty() || is_glob_pattern(ext) {
                    bail!(
                        "Invalid entry in 'whiteList': \"{}\" (expected a file name or *.ext)",
                        item
                    );
                }
            }
        }

        for dir in &self.directories_to_scan {
            if is_glob_pattern(dir) {
                Pattern::new(dir).with_context(|| {
                    format!("Invalid glob pattern in 'directoriesToScan': \"{}\"", dir)
                })?;
            }
        }

        if self.jobs == Some(0) {
            bail!("'jobs' must be at least 1");
        }

        Ok(())
    }

    pub fn tokens(&self) -> NuggetTokens {
        NuggetTokens {
            begin: self.nugget_begin_token.clone(),
            end: self.nugget_end_token.clone(),
            delimiter: self.nugget_delimiter_token.clone(),
            comment: self.nugget_comment_token.clone(),
        }
    }

    /// Turn the config into absolute scan settings rooted at `project_dir`.
    ///
    /// Relative directories and blacklist entries are joined to the project
    /// directory. Directory entries containing `*` or `?` expand to every
    /// matching directory.
    pub fn resolve(&self, project_dir: &Path) -> Result<ScanSettings> {
        let project_dir = path::absolute(project_dir)
            .map(|p| normalize_path(&p))
            .with_context(|| format!("Invalid project directory: {:?}", project_dir))?;

        let mut directories_to_scan = Vec::new();
        for dir in &self.directories_to_scan {
            let full = normalize_path(&project_dir.join(dir));
            if is_glob_pattern(dir) {
                let pattern = full.to_string_lossy();
                let entries = glob(&pattern).with_context(|| {
                    format!("Invalid glob pattern in 'directoriesToScan': \"{}\"", dir)
                })?;
                directories_to_scan.extend(entries.flatten().filter(|entry| entry.is_dir()));
            } else {
                directories_to_scan.push(full);
            }
        }

        let black_list = self
            .black_list
            .iter()
            .map(|item| normalize_path(&project_dir.join(item)))
            .collect();

        Ok(ScanSettings {
            project_dir,
            directories_to_scan,
            white_list: self.white_list.clone(),
            black_list,
            disable_references: self.disable_references,
            message_context_enabled_from_comment: self.message_context_enabled_from_comment,
            jobs: self.jobs.unwrap_or(0),
        })
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    // Relative paths cannot be popped past their first component.
    let mut current = path::absolute(start_dir).unwrap_or_else(|_| start_dir.to_path_buf());

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Config file the settings came from; `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
