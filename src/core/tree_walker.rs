use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{diagnostics::ScanDiagnostic, path_filter::PathFilter};

/// Error yielded while walking one root.
#[derive(Debug)]
pub struct WalkError {
    /// True when the root itself could not be read.
    pub at_root: bool,
    pub path: Option<PathBuf>,
    pub error: walkdir::Error,
}

impl WalkError {
    pub fn into_diagnostic(self, root: &Path) -> ScanDiagnostic {
        if self.at_root {
            ScanDiagnostic::RootUnavailable {
                root: root.to_path_buf(),
                error: self.error.to_string(),
            }
        } else {
            ScanDiagnostic::InaccessibleSubtree {
                path: self.path,
                error: self.error.to_string(),
            }
        }
    }
}

/// Lazily enumerate files below `root`.
///
/// Directories blacklisted by `filter` are pruned before descending. Entries
/// within a directory come out sorted by file name. A directory that cannot
/// be read yields one `Err` and the walk carries on with its siblings.
pub fn walk_files<'a>(
    root: &Path,
    filter: &'a PathFilter,
) -> impl Iterator<Item = Result<PathBuf, WalkError>> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            !(entry.file_type().is_dir() && filter.is_blacklisted_dir(entry.path()))
        })
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(error) => Some(Err(WalkError {
                at_root: error.depth() == 0,
                path: error.path().map(Path::to_path_buf),
                error,
            })),
        })
}
