//! Scan orchestration: walk, filter, extract, merge.
//!
//! ## Pipeline
//!
//! 1. Every configured root is walked once, pruning blacklisted subtrees.
//! 2. Each discovered file goes through the [`PathFilter`].
//! 3. Eligible files are extracted and merged into a shared [`Catalog`],
//!    sequentially when `jobs == 1` and on a rayon pool otherwise.
//!
//! Per-file and per-directory failures become [`ScanDiagnostic`]s; only a scan
//! where no root could be enumerated at all is an error.

use std::{
    collections::HashSet,
    path::PathBuf,
    sync::atomic::{AtomicBool, Ordering},
};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use super::{
    catalog::{Catalog, TemplateCatalog},
    diagnostics::ScanDiagnostic,
    extract::{ExtractError, NuggetExtractor},
    path_filter::{Eligibility, PathFilter},
    tokenizer::NuggetTokenizer,
    tree_walker::walk_files,
};

/// Fully resolved settings for one scan. All paths are absolute.
#[derive(Debug, Clone, Default)]
pub struct ScanSettings {
    pub project_dir: PathBuf,
    pub directories_to_scan: Vec<PathBuf>,
    pub white_list: Vec<String>,
    pub black_list: Vec<PathBuf>,
    pub disable_references: bool,
    pub message_context_enabled_from_comment: bool,
    /// Worker threads for extraction; 0 uses rayon's default pool.
    pub jobs: usize,
}

/// Everything a scan produced.
#[derive(Debug)]
pub struct ScanOutcome {
    pub catalog: TemplateCatalog,
    pub diagnostics: Vec<ScanDiagnostic>,
    /// Files whose nuggets were merged, in discovery order.
    pub scanned_files: Vec<PathBuf>,
    /// True if the scan stopped early because cancellation was requested.
    pub cancelled: bool,
}

enum FileResult {
    Merged,
    Skipped(ScanDiagnostic),
    Cancelled,
}

/// Finds nuggets in every eligible file under the configured roots.
pub struct NuggetFinder {
    settings: ScanSettings,
    tokenizer: Box<dyn NuggetTokenizer>,
}

impl NuggetFinder {
    pub fn new(settings: ScanSettings, tokenizer: Box<dyn NuggetTokenizer>) -> Self {
        Self {
            settings,
            tokenizer,
        }
    }

    /// Run a full scan.
    ///
    /// # Errors
    ///
    /// Returns an error if none of the configured roots could be enumerated,
    /// or if the worker pool cannot be created.
    pub fn parse_all(&self) -> Result<ScanOutcome> {
        self.parse_all_with_cancel(None)
    }

    /// Run a full scan, checking `cancel` before each file.
    ///
    /// A file is either merged completely or not at all.
    pub fn parse_all_with_cancel(&self, cancel: Option<&AtomicBool>) -> Result<ScanOutcome> {
        let settings = &self.settings;
        let filter = PathFilter::new(&settings.white_list, &settings.black_list);

        let mut diagnostics = Vec::new();
        let files = self.discover_files(&filter, &mut diagnostics)?;

        let catalog = Catalog::new(
            settings.disable_references,
            settings.message_context_enabled_from_comment,
        );
        let extractor = NuggetExtractor::new(
            self.tokenizer.as_ref(),
            &settings.project_dir,
            settings.disable_references,
        );
        let is_cancelled = || cancel.is_some_and(|flag| flag.load(Ordering::SeqCst));

        let process = |path: &PathBuf| -> FileResult {
            if is_cancelled() {
                return FileResult::Cancelled;
            }
            match extractor.extract_file(path) {
                Ok(occurrences) => {
                    catalog.merge_all(occurrences);
                    FileResult::Merged
                }
                Err(ExtractError::Read(error)) => {
                    FileResult::Skipped(ScanDiagnostic::UnreadableFile {
                        path: path.clone(),
                        error: format!("{:#}", error),
                    })
                }
                Err(ExtractError::Tokenize(error)) => {
                    FileResult::Skipped(ScanDiagnostic::TokenizerFailure {
                        path: path.clone(),
                        error: format!("{:#}", error),
                    })
                }
            }
        };

        let results: Vec<FileResult> = match settings.jobs {
            1 => files.iter().map(process).collect(),
            0 => files.par_iter().map(process).collect(),
            jobs => rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .context("Failed to start scan worker pool")?
                .install(|| files.par_iter().map(process).collect()),
        };

        let mut scanned_files = Vec::new();
        let mut cancelled = false;
        for (path, result) in files.into_iter().zip(results) {
            match result {
                FileResult::Merged => scanned_files.push(path),
                FileResult::Skipped(diagnostic) => diagnostics.push(diagnostic),
                FileResult::Cancelled => cancelled = true,
            }
        }

        Ok(ScanOutcome {
            catalog: catalog.into_entries(),
            diagnostics,
            scanned_files,
            cancelled,
        })
    }

    /// Walk every root and return eligible files in discovery order.
    ///
    /// Files reachable from more than one root are only returned once. An
    /// empty root list counts as every root being unavailable.
    fn discover_files(
        &self,
        filter: &PathFilter,
        diagnostics: &mut Vec<ScanDiagnostic>,
    ) -> Result<Vec<PathBuf>> {
        let roots = &self.settings.directories_to_scan;
        if roots.is_empty() {
            bail!("No directories to scan: no configured directory resolved to an existing path");
        }

        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut files = Vec::new();
        let mut unavailable_roots = 0;

        for root in roots {
            for item in walk_files(root, filter) {
                let path = match item {
                    Ok(path) => path,
                    Err(error) => {
                        if error.at_root {
                            unavailable_roots += 1;
                        }
                        diagnostics.push(error.into_diagnostic(root));
                        continue;
                    }
                };

                match filter.check(&path) {
                    Eligibility::Eligible => {
                        if seen.insert(path.clone()) {
                            files.push(path);
                        }
                    }
                    Eligibility::TooLong => {
                        diagnostics.push(ScanDiagnostic::UnprocessablePath { path });
                    }
                    Eligibility::Blacklisted | Eligibility::NotWhitelisted => {}
                }
            }
        }

        if unavailable_roots == roots.len() {
            bail!(
                "None of the directories to scan could be read: {}",
                display_paths(roots)
            );
        }

        Ok(files)
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
