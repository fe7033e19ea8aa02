//! TreeWalker - recursive traversal with exclusion pruning

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::exclude::ExclusionSet;

use super::utils::{join_relative, read_sorted_entries};
use super::visitor::{Entry, TreeVisitor};

/// Counts gathered during one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub dirs: usize,
    pub files: usize,
    pub excluded: usize,
}

/// Walks a scan root, skipping excluded entries and pruning excluded
/// directories before they are read.
pub struct TreeWalker<'a> {
    root: PathBuf,
    exclusions: &'a ExclusionSet,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: impl Into<PathBuf>, exclusions: &'a ExclusionSet) -> Self {
        Self {
            root: root.into(),
            exclusions,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the whole tree. The root itself is not reported to the visitor.
    ///
    /// A directory that cannot be read aborts the walk, as does any error
    /// returned by the visitor.
    pub fn walk<V: TreeVisitor>(&self, visitor: &mut V) -> Result<WalkStats> {
        let mut stats = WalkStats::default();
        self.walk_dir(&self.root, "", 0, visitor, &mut stats)?;
        Ok(stats)
    }

    fn walk_dir<V: TreeVisitor>(
        &self,
        dir: &Path,
        relative: &str,
        depth: usize,
        visitor: &mut V,
        stats: &mut WalkStats,
    ) -> Result<()> {
        for dir_entry in read_sorted_entries(dir)? {
            let name = dir_entry.file_name().to_string_lossy().to_string();
            let entry_relative = join_relative(relative, &name);

            if self.exclusions.is_excluded(&entry_relative) {
                tracing::trace!(path = %entry_relative, "excluded");
                stats.excluded += 1;
                continue;
            }

            let path = dir_entry.path();
            let Some((kind, symlink)) = EntryKind::of(&path) else {
                continue;
            };

            let entry = Entry {
                path,
                relative: entry_relative,
                name,
                depth,
                symlink,
            };

            match kind {
                EntryKind::Dir => {
                    stats.dirs += 1;
                    visitor.enter_dir(&entry)?;
                    self.walk_dir(&entry.path, &entry.relative, depth + 1, visitor, stats)?;
                    visitor.exit_dir(&entry)?;
                }
                EntryKind::File => {
                    stats.files += 1;
                    visitor.visit_file(&entry)?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
}

impl EntryKind {
    /// Classify a directory entry, and tell whether it is a symlink.
    ///
    /// Symlinks to files count as files. Symlinks to directories are not
    /// followed, which rules out cycles. Broken links and special files are
    /// skipped.
    fn of(path: &Path) -> Option<(Self, bool)> {
        let link = match fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot stat entry, skipping");
                return None;
            }
        };

        if link.file_type().is_symlink() {
            return match fs::metadata(path) {
                Ok(target) if target.is_file() => Some((EntryKind::File, true)),
                Ok(_) => {
                    tracing::debug!(path = %path.display(), "not following directory symlink");
                    None
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "broken symlink, skipping");
                    None
                }
            };
        }

        if link.is_dir() {
            Some((EntryKind::Dir, false))
        } else if link.is_file() {
            Some((EntryKind::File, false))
        } else {
            None
        }
    }
}
