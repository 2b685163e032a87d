use std::path::{self, Path, PathBuf};

/// Paths at or above this many characters are never processed.
pub const MAX_PATH_LENGTH: usize = 260;

/// Outcome of checking one discovered path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    /// The file sits under a blacklisted directory.
    Blacklisted,
    /// The path is too long to process.
    TooLong,
    /// No whitelist entry matches the file.
    NotWhitelisted,
}

/// One whitelist rule: an exact file name or a `*.ext` catch-all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhitelistPattern {
    FileName(String),
    /// Dot-prefixed extension, e.g. `.js` for `*.js`.
    Extension(String),
}

impl WhitelistPattern {
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_prefix('*') {
            Some(ext) if ext.starts_with('.') => WhitelistPattern::Extension(ext.to_string()),
            _ => WhitelistPattern::FileName(pattern.to_string()),
        }
    }

    fn matches(&self, path: &Path) -> bool {
        match self {
            WhitelistPattern::Extension(ext) => {
                dotted_extension(path).as_deref() == Some(ext.as_str())
            }
            WhitelistPattern::FileName(name) => {
                path.file_name().and_then(|n| n.to_str()) == Some(name.as_str())
            }
        }
    }
}

/// `Some(".js")` for `a/b/c.js`; `None` when the file has no extension.
fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
}

/// Decides which discovered files get scanned.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    whitelist: Vec<WhitelistPattern>,
    /// Lowercased blacklist prefixes.
    blacklist: Vec<String>,
}

impl PathFilter {
    pub fn new<W, B>(whitelist: W, blacklist: B) -> Self
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<Path>,
    {
        Self {
            whitelist: whitelist
                .into_iter()
                .map(|p| WhitelistPattern::parse(p.as_ref()))
                .collect(),
            blacklist: blacklist
                .into_iter()
                .map(|p| lowercase_path(&absolute(p.as_ref())))
                .collect(),
        }
    }

    /// True if `dir` (or an ancestor) is blacklisted.
    ///
    /// Comparison is a case-insensitive string prefix check on the absolute path.
    pub fn is_blacklisted_dir(&self, dir: &Path) -> bool {
        if self.blacklist.is_empty() {
            return false;
        }
        let dir = lowercase_path(&absolute(dir));
        self.blacklist.iter().any(|prefix| dir.starts_with(prefix))
    }

    pub fn check(&self, path: &Path) -> Eligibility {
        let absolute_path = absolute(path);
        let blacklisted = match absolute_path.parent() {
            Some(parent) => self.is_blacklisted_dir(parent),
            None => true,
        };
        if blacklisted {
            return Eligibility::Blacklisted;
        }

        if path.to_string_lossy().chars().count() >= MAX_PATH_LENGTH {
            return Eligibility::TooLong;
        }

        if self.whitelist.iter().any(|pattern| pattern.matches(path)) {
            Eligibility::Eligible
        } else {
            Eligibility::NotWhitelisted
        }
    }
}

fn absolute(p: &Path) -> PathBuf {
    path::absolute(p).unwrap_or_else(|_| p.to_path_buf())
}

fn lowercase_path(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}
