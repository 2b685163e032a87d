use std::{fmt, path::PathBuf};

/// A non-fatal problem encountered during a scan.
///
/// Diagnostics are collected for reporting and never change whether the scan
/// as a whole succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanDiagnostic {
    /// A configured root could not be enumerated at all.
    RootUnavailable { root: PathBuf, error: String },
    /// A directory below a root could not be read; its subtree was skipped.
    InaccessibleSubtree { path: Option<PathBuf>, error: String },
    /// Path length at or above the ceiling; the file was skipped.
    UnprocessablePath { path: PathBuf },
    /// The file could not be opened or decoded.
    UnreadableFile { path: PathBuf, error: String },
    /// The tokenizer rejected the file's content; nothing from it was merged.
    TokenizerFailure { path: PathBuf, error: String },
}

impl fmt::Display for ScanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanDiagnostic::RootUnavailable { root, error } => {
                write!(f, "Cannot scan directory {}: {}", root.display(), error)
            }
            ScanDiagnostic::InaccessibleSubtree { path, error } => match path {
                Some(path) => write!(f, "Cannot access path {}: {}", path.display(), error),
                None => write!(f, "Cannot access path: {}", error),
            },
            ScanDiagnostic::UnprocessablePath { path } => {
                write!(f, "Path too long to process: {}", path.display())
            }
            ScanDiagnostic::UnreadableFile { path, error } => {
                write!(f, "Cannot read file {}: {}", path.display(), error)
            }
            ScanDiagnostic::TokenizerFailure { path, error } => {
                write!(f, "Skipped {}: {}", path.display(), error)
            }
        }
    }
}
