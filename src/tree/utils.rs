//! Shared path helpers for tree walking

use std::fs::DirEntry;
use std::path::{Component, Path};

use crate::error::{Result, ScanError};

/// Read a directory's entries sorted by file name.
///
/// Filesystem enumeration order is not stable across platforms, so entries
/// are sorted to keep reports reproducible.
pub fn read_sorted_entries(dir: &Path) -> Result<Vec<DirEntry>> {
    let read_err = |source| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = std::fs::read_dir(dir)
        .map_err(read_err)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_err)?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

/// Append `name` to a `/`-separated relative path.
pub fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Express `path` relative to `root` with `/` separators.
///
/// Returns `None` when `path` is not under `root`, including paths that
/// climb out of it through `..`.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(s) => parts.push(s.to_string_lossy()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_join_relative() {
        assert_eq!(join_relative("", "src"), "src");
        assert_eq!(join_relative("src", "index.js"), "src/index.js");
        assert_eq!(join_relative("a/b", "c"), "a/b/c");
    }

    #[test]
    fn test_relative_path() {
        let root = Path::new("/work/project");
        assert_eq!(
            relative_path(root, Path::new("/work/project/src/index.js")),
            Some("src/index.js".to_string())
        );
        assert_eq!(relative_path(root, root), Some(String::new()));
        assert_eq!(relative_path(root, Path::new("/elsewhere/file.js")), None);
        assert_eq!(relative_path(root, Path::new("/work/project/../a")), None);
        assert_eq!(
            relative_path(root, Path::new("/work/project/./src")),
            Some("src".to_string())
        );
    }

    #[test]
    fn test_read_sorted_entries() {
        let dir = TempDir::new().unwrap();
        for name in ["zeta.js", "alpha.js", "mid"] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let names: Vec<_> = read_sorted_entries(dir.path())
            .unwrap()
            .iter()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["alpha.js", "mid", "zeta.js"]);
    }

    #[test]
    fn test_read_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let err = read_sorted_entries(&missing).unwrap_err();
        assert!(matches!(err, ScanError::ReadDir { .. }));
    }
}
