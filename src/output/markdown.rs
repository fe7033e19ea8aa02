//! Markdown project scope
//!
//! A flat document with one section per entry, in traversal order:
//!
//! - a directory at depth `d` is a heading of level `d + 1` naming its
//!   relative path
//! - a file at depth `d` is a heading of level `d + 2` followed by a fenced
//!   code block tagged with the file's extension (`txt` when it has none)
//!
//! Sections are joined with newlines.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::Result;
use crate::tree::{Entry, TreeVisitor};

use super::read_content;

const PLAIN_TEXT_TAG: &str = "txt";

/// Builds the Markdown document during a walk.
#[derive(Debug, Default)]
pub struct MarkdownReport {
    sections: Vec<String>,
    /// Canonical paths already emitted; an entry reachable twice is
    /// written once.
    emitted: HashSet<PathBuf>,
}

impl MarkdownReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn render(&self) -> String {
        self.sections.join("\n")
    }

    /// Record `entry` as emitted. Returns false if it already was.
    fn first_visit(&mut self, entry: &Entry) -> bool {
        let key = entry
            .path
            .canonicalize()
            .unwrap_or_else(|_| entry.path.clone());
        self.emitted.insert(key)
    }
}

impl TreeVisitor for MarkdownReport {
    fn enter_dir(&mut self, dir: &Entry) -> Result<()> {
        if self.first_visit(dir) {
            self.sections
                .push(format!("{} {}", heading(dir.depth + 1), dir.relative));
        }
        Ok(())
    }

    fn visit_file(&mut self, file: &Entry) -> Result<()> {
        if !self.first_visit(file) {
            tracing::debug!(path = %file.relative, "already emitted, skipping");
            return Ok(());
        }

        let content = read_content(&file.path)?;
        let tag = match file.extension() {
            "" => PLAIN_TEXT_TAG,
            ext => ext,
        };
        let fence = fence_for(&content);
        self.sections.push(format!(
            "{} {}\n\n{fence}{}\n{}\n{fence}\n\n",
            heading(file.depth + 2),
            file.relative,
            tag,
            content,
        ));
        Ok(())
    }
}

fn heading(level: usize) -> String {
    "#".repeat(level)
}

/// A backtick fence longer than any backtick run inside `content`.
fn fence_for(content: &str) -> String {
    let longest = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclude::ExclusionSet;
    use crate::tree::TreeWalker;
    use std::fs;
    use std::os::unix::fs::symlink;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn build(root: &Path, exclusions: &ExclusionSet) -> MarkdownReport {
        let mut report = MarkdownReport::new();
        TreeWalker::new(root, exclusions).walk(&mut report).unwrap();
        report
    }

    #[test]
    fn test_sections_and_heading_levels() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "README", "hello");
        write(dir.path(), "src/index.js", "console.log(1)");

        let report = build(dir.path(), &ExclusionSet::new());
        assert_eq!(
            report.sections(),
            &[
                "## README\n\n```txt\nhello\n```\n\n".to_string(),
                "# src".to_string(),
                "### src/index.js\n\n```js\nconsole.log(1)\n```\n\n".to_string(),
            ]
        );
    }

    #[test]
    fn test_one_code_block_per_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.js", "a");
        write(dir.path(), "lib/b.rs", "b");
        write(dir.path(), "lib/deep/c.md", "c");
        write(dir.path(), "dist/skip.js", "skip");

        let exclusions = ExclusionSet::new().with_dir_token("dist");
        let doc = build(dir.path(), &exclusions).render();

        let opening_fences = doc.lines().filter(|l| l.starts_with("```") && l.len() > 3).count();
        assert_eq!(opening_fences, 3);
        assert!(!doc.contains("dist"));
    }

    #[test]
    fn test_fence_outgrows_embedded_backticks() {
        assert_eq!(fence_for("plain"), "```");
        assert_eq!(fence_for("use ``` here"), "````");
        assert_eq!(fence_for("````` five"), "``````");

        let dir = TempDir::new().unwrap();
        write(dir.path(), "doc.md", "```rust\nfn x() {}\n```");
        let doc = build(dir.path(), &ExclusionSet::new()).render();
        assert!(doc.starts_with("## doc.md\n\n````md\n"));
        assert!(doc.ends_with("\n````\n\n"));
    }

    #[test]
    fn test_symlinked_file_is_emitted_once() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "real.js", "x");
        symlink(dir.path().join("real.js"), dir.path().join("alias.js")).unwrap();

        let report = build(dir.path(), &ExclusionSet::new());
        assert_eq!(report.sections().len(), 1);
        assert!(report.sections()[0].starts_with("## alias.js"));
    }
}
