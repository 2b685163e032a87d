//! Common utility functions shared across the codebase.

use std::path::{Component, Path, PathBuf};

/// Drop `.` components without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Express `path` relative to `base` using `/` separators.
///
/// Falls back to the full path when `path` is not below `base`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use nuggets::utils::make_relative_path;
///
/// assert_eq!(
///     make_relative_path(Path::new("/proj"), Path::new("/proj/src/a.cshtml")),
///     "src/a.cshtml"
/// );
/// assert_eq!(
///     make_relative_path(Path::new("/proj"), Path::new("/other/b.js")),
///     "/other/b.js"
/// );
/// ```
pub fn make_relative_path(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let is_relative = relative != path;

    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();

    let joined = parts.join("/");
    if is_relative || !path.has_root() {
        joined
    } else {
        format!("/{}", joined)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::utils::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/proj/./src/.")),
            PathBuf::from("/proj/src")
        );
        assert_eq!(normalize_path(Path::new("./src")), PathBuf::from("src"));
    }

    #[test]
    fn test_make_relative_path() {
        assert_eq!(
            make_relative_path(Path::new("/proj"), Path::new("/proj/a.js")),
            "a.js"
        );
        assert_eq!(
            make_relative_path(Path::new("/proj/"), Path::new("/proj/views/home/index.cshtml")),
            "views/home/index.cshtml"
        );
        assert_eq!(
            make_relative_path(Path::new("/proj"), Path::new("/elsewhere/a.js")),
            "/elsewhere/a.js"
        );
        assert_eq!(
            make_relative_path(Path::new("proj"), Path::new("proj/src/x.vb")),
            "src/x.vb"
        );
    }
}
