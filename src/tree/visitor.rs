//! Visitor callbacks for the tree walk

use std::path::PathBuf;

use crate::error::Result;

/// A directory or file reached by the walk.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Absolute (or root-joined) path on disk.
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated.
    pub relative: String,
    /// Final path component.
    pub name: String,
    /// Nesting level; children of the root are at depth 0.
    pub depth: usize,
    /// Reached through a symbolic link.
    pub symlink: bool,
}

impl Entry {
    /// Extension without the dot, or an empty string.
    pub fn extension(&self) -> &str {
        match self.name.rsplit_once('.') {
            // A leading dot marks a hidden file, not an extension
            Some((stem, ext)) if !stem.is_empty() => ext,
            _ => "",
        }
    }
}

/// Receives entries in traversal order.
///
/// Directory callbacks default to no-ops so file-only passes need to
/// implement just [`visit_file`](TreeVisitor::visit_file). Returning an
/// error aborts the walk.
pub trait TreeVisitor {
    fn enter_dir(&mut self, _dir: &Entry) -> Result<()> {
        Ok(())
    }

    fn exit_dir(&mut self, _dir: &Entry) -> Result<()> {
        Ok(())
    }

    fn visit_file(&mut self, file: &Entry) -> Result<()>;
}
