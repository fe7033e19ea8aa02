//! Path header comments
//!
//! Every recognized source file gets a first line naming its path relative
//! to the project root, written in the file's own comment syntax:
//!
//! ```text
//! // src/index.js
//! <!-- docs/guide.md -->
//! /*  styles/main.css  */
//! ```
//!
//! # Detecting an existing header
//!
//! A header is any first line of the form `prefix .* suffix`, using the
//! file's delimiters. The pattern is anchored at the start of the content
//! and cannot cross a newline, so only the first line is ever replaced.
//! It does not look at the old path, which lets a moved file pick up its
//! new location on the next run. Applying the transform twice yields the
//! same content as applying it once.
//!
//! Files that begin with `#!` are left alone: the interpreter directive
//! must stay on the first line. Symlinks are not written through, and
//! paths containing a line break are skipped since their header could not
//! be recognized again.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::ScanConfig;
use crate::error::{AnnotateError, Result};
use crate::syntax::CommentSyntax;
use crate::tree::{Entry, TreeVisitor, TreeWalker};

/// Result of computing the header for one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// No header was present; one was prepended.
    Added(String),
    /// A header was present but differed; it was replaced.
    Updated(String),
    /// The correct header is already in place.
    Unchanged,
    /// The content starts with an interpreter directive.
    SkippedShebang,
    /// The relative path contains a line break.
    SkippedLineBreak,
}

impl Annotation {
    /// The rewritten content, if the file needs writing.
    pub fn new_content(&self) -> Option<&str> {
        match self {
            Annotation::Added(s) | Annotation::Updated(s) => Some(s),
            Annotation::Unchanged | Annotation::SkippedShebang | Annotation::SkippedLineBreak => {
                None
            }
        }
    }
}

/// Counts from one annotation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotateSummary {
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Files with no known comment syntax, starting with `#!`, reached
    /// through a symlink, or with a line break in their path.
    pub skipped: usize,
    /// Files that could not be read or written.
    pub failed: usize,
}

impl AnnotateSummary {
    pub fn changed(&self) -> usize {
        self.added + self.updated
    }
}

/// The first line of the content, without trailing blanks or line ending.
static FIRST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A([^\n]*?)[ \t]*(?:\r?\n|\z)").expect("FIRST_LINE regex is invalid")
});

/// Byte length of an existing header line (including its line ending), if
/// the first line is a comment in `syntax`.
fn existing_header(content: &str, syntax: &CommentSyntax) -> Option<usize> {
    let caps = FIRST_LINE.captures(content)?;
    let line = caps.get(1)?.as_str();
    let is_header = line.len() >= syntax.prefix.len() + syntax.suffix.len()
        && line.starts_with(syntax.prefix)
        && line.ends_with(syntax.suffix);
    is_header.then(|| caps.get(0).map_or(0, |m| m.end()))
}

/// Compute the annotated form of `content` for a file at `relative`.
pub fn annotate_content(content: &str, syntax: &CommentSyntax, relative: &str) -> Annotation {
    if content.starts_with("#!") {
        return Annotation::SkippedShebang;
    }
    if relative.contains(['\n', '\r']) {
        return Annotation::SkippedLineBreak;
    }

    let header = syntax.header(relative);
    match existing_header(content, syntax) {
        Some(end) => {
            let mut updated = String::with_capacity(content.len() + header.len());
            updated.push_str(&header);
            updated.push_str(&content[end..]);
            if updated == content {
                Annotation::Unchanged
            } else {
                Annotation::Updated(updated)
            }
        }
        None => Annotation::Added(header + content),
    }
}

/// Annotate one file in place.
///
/// Files with an unknown extension are reported as [`Annotation::Unchanged`]
/// and never opened for writing.
pub fn annotate_file(path: &Path, relative: &str) -> Result<Annotation, AnnotateError> {
    let Some(syntax) = CommentSyntax::for_path(path) else {
        return Ok(Annotation::Unchanged);
    };

    let bytes = std::fs::read(path).map_err(|source| AnnotateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| AnnotateError::Encoding {
        path: path.to_path_buf(),
    })?;

    let annotation = annotate_content(&content, &syntax, relative);
    if let Some(new_content) = annotation.new_content() {
        std::fs::write(path, new_content).map_err(|source| AnnotateError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(annotation)
}

/// Visitor that annotates every regular file it is handed.
///
/// Symlinks are skipped: writing through one would touch its target, which
/// may live outside the root or carry a header of its own. Per-file
/// failures are logged and counted; they never stop the walk.
#[derive(Debug, Default)]
pub struct HeaderAnnotator {
    summary: AnnotateSummary,
}

impl HeaderAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> AnnotateSummary {
        self.summary
    }
}

impl TreeVisitor for HeaderAnnotator {
    fn visit_file(&mut self, file: &Entry) -> Result<()> {
        if CommentSyntax::for_path(&file.path).is_none() {
            tracing::debug!(path = %file.relative, "no comment syntax, skipping");
            self.summary.skipped += 1;
            return Ok(());
        }
        if file.symlink {
            tracing::debug!(path = %file.relative, "symlink, skipping");
            self.summary.skipped += 1;
            return Ok(());
        }

        match annotate_file(&file.path, &file.relative) {
            Ok(Annotation::Added(_)) => {
                tracing::info!(path = %file.relative, "comment added");
                self.summary.added += 1;
            }
            Ok(Annotation::Updated(_)) => {
                tracing::info!(path = %file.relative, "comment updated");
                self.summary.updated += 1;
            }
            Ok(Annotation::Unchanged) => {
                tracing::debug!(path = %file.relative, "comment up to date");
                self.summary.unchanged += 1;
            }
            Ok(Annotation::SkippedShebang) => {
                tracing::debug!(path = %file.relative, "interpreter directive, skipping");
                self.summary.skipped += 1;
            }
            Ok(Annotation::SkippedLineBreak) => {
                tracing::warn!(path = ?file.relative, "line break in file name, skipping");
                self.summary.skipped += 1;
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.summary.failed += 1;
            }
        }
        Ok(())
    }
}

/// Annotate every non-excluded file under the configured root.
pub fn annotate_tree(config: &ScanConfig) -> Result<AnnotateSummary> {
    let mut annotator = HeaderAnnotator::new();
    TreeWalker::new(config.root(), config.exclusions()).walk(&mut annotator)?;
    Ok(annotator.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclude::ExclusionSet;
    use std::fs;
    use tempfile::TempDir;

    const JS: CommentSyntax = CommentSyntax::new("// ", "");
    const HTML: CommentSyntax = CommentSyntax::new("<!-- ", " -->");
    const CSS: CommentSyntax = CommentSyntax::new("/*  ", "  */");

    #[test]
    fn test_prepends_missing_header() {
        let result = annotate_content("console.log(1)", &JS, "src/index.js");
        assert_eq!(
            result,
            Annotation::Added("// src/index.js\nconsole.log(1)".to_string())
        );
    }

    #[test]
    fn test_idempotent() {
        let once = annotate_content("console.log(1)\n", &JS, "src/index.js");
        let first = once.new_content().unwrap().to_string();
        assert_eq!(annotate_content(&first, &JS, "src/index.js"), Annotation::Unchanged);
    }

    #[test]
    fn test_replaces_stale_header_after_move() {
        let content = "// old/place.js\nlet x = 1;\n";
        let result = annotate_content(content, &JS, "new/place.js");
        assert_eq!(
            result,
            Annotation::Updated("// new/place.js\nlet x = 1;\n".to_string())
        );
    }

    #[test]
    fn test_only_first_line_is_considered() {
        let content = "let x = 1;\n// a later comment\n";
        let result = annotate_content(content, &JS, "a.js");
        assert_eq!(
            result,
            Annotation::Added("// a.js\nlet x = 1;\n// a later comment\n".to_string())
        );
    }

    #[test]
    fn test_block_comment_header() {
        let content = "<!-- stale -->\n<h1>Hi</h1>\n";
        let result = annotate_content(content, &HTML, "public/index.html");
        assert_eq!(
            result,
            Annotation::Updated("<!-- public/index.html -->\n<h1>Hi</h1>\n".to_string())
        );

        let css = annotate_content("body {}\n", &CSS, "main.css");
        assert_eq!(
            css,
            Annotation::Added("/*  main.css  */\nbody {}\n".to_string())
        );
    }

    #[test]
    fn test_block_comment_without_closing_is_not_a_header() {
        // The suffix must appear on the first line
        let content = "<!-- multi\nline -->\n<p></p>\n";
        let result = annotate_content(content, &HTML, "x.html");
        assert!(matches!(result, Annotation::Added(_)));
    }

    #[test]
    fn test_header_only_file_without_newline() {
        let first = annotate_content("// stale", &JS, "a.js");
        assert_eq!(first, Annotation::Updated("// a.js\n".to_string()));
        assert_eq!(annotate_content("// a.js\n", &JS, "a.js"), Annotation::Unchanged);
    }

    #[test]
    fn test_crlf_header_is_normalized_once() {
        let first = annotate_content("// a.js\r\nx\r\n", &JS, "a.js");
        let rewritten = first.new_content().unwrap().to_string();
        assert_eq!(rewritten, "// a.js\nx\r\n");
        assert_eq!(annotate_content(&rewritten, &JS, "a.js"), Annotation::Unchanged);
    }

    #[test]
    fn test_shebang_is_never_modified() {
        let content = "#!/usr/bin/env node\nconsole.log(1)\n";
        assert_eq!(annotate_content(content, &JS, "bin/cli.js"), Annotation::SkippedShebang);
    }

    #[test]
    fn test_line_break_in_path_is_skipped() {
        assert_eq!(annotate_content("x\n", &JS, "a\nb.js"), Annotation::SkippedLineBreak);
        assert_eq!(annotate_content("x\n", &JS, "a\rb.js"), Annotation::SkippedLineBreak);
    }

    #[test]
    fn test_trailing_text_after_block_comment_is_not_a_header() {
        let content = "<!-- note --> <p></p>\n";
        let result = annotate_content(content, &HTML, "x.html");
        assert_eq!(
            result,
            Annotation::Added("<!-- x.html -->\n<!-- note --> <p></p>\n".to_string())
        );
    }

    #[test]
    fn test_trailing_blanks_after_header_are_replaced() {
        let result = annotate_content("/*  a.css  */  \nb {}\n", &CSS, "a.css");
        assert_eq!(result, Annotation::Updated("/*  a.css  */\nb {}\n".to_string()));
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(
            annotate_content("", &JS, "empty.js"),
            Annotation::Added("// empty.js\n".to_string())
        );
    }

    #[test]
    fn test_annotate_file_writes_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.ts");
        fs::write(&path, "export {}\n").unwrap();

        let result = annotate_file(&path, "index.ts").unwrap();
        assert!(matches!(result, Annotation::Added(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "// index.ts\nexport {}\n");
    }

    #[test]
    fn test_annotate_file_ignores_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{}").unwrap();

        assert_eq!(annotate_file(&path, "data.json").unwrap(), Annotation::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_annotate_file_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.js");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = annotate_file(&path, "bad.js").unwrap_err();
        assert!(matches!(err, AnnotateError::Encoding { .. }));
        assert_eq!(fs::read(&path).unwrap(), vec![0xff, 0xfe, 0x00]);
    }

    #[test]
    fn test_annotate_tree_counts_and_continues_past_failures() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/a.js"), "a()\n").unwrap();
        fs::write(root.join("src/b.js"), "// src/b.js\nb()\n").unwrap();
        fs::write(root.join("src/c.js"), [0xff, 0xfe]).unwrap();
        fs::write(root.join("src/run.sh"), "#!/bin/sh\necho hi\n").unwrap();
        fs::write(root.join("notes.txt"), "plain\n").unwrap();

        let config = ScanConfig::new(root).with_exclusions(ExclusionSet::new());
        let summary = annotate_tree(&config).unwrap();

        assert_eq!(
            summary,
            AnnotateSummary {
                added: 1,
                updated: 0,
                unchanged: 1,
                skipped: 2,
                failed: 1,
            }
        );
        assert_eq!(fs::read_to_string(root.join("src/a.js")).unwrap(), "// src/a.js\na()\n");
        assert_eq!(fs::read_to_string(root.join("notes.txt")).unwrap(), "plain\n");
    }

    #[test]
    fn test_annotate_tree_skips_line_break_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a\nb.js");
        fs::write(&path, "x\n").unwrap();

        let config = ScanConfig::new(dir.path()).with_exclusions(ExclusionSet::new());
        for _ in 0..2 {
            let summary = annotate_tree(&config).unwrap();
            assert_eq!(summary.skipped, 1);
            assert_eq!(summary.changed(), 0);
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "x\n");
    }

    #[test]
    fn test_annotate_tree_does_not_write_through_symlinks() {
        use std::os::unix::fs::symlink;

        let outside = TempDir::new().unwrap();
        let shared = outside.path().join("shared.js");
        fs::write(&shared, "shared()\n").unwrap();

        let dir = TempDir::new().unwrap();
        symlink(&shared, dir.path().join("link.js")).unwrap();

        let config = ScanConfig::new(dir.path()).with_exclusions(ExclusionSet::new());
        let summary = annotate_tree(&config).unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(fs::read_to_string(&shared).unwrap(), "shared()\n");
    }

    #[test]
    fn test_annotate_tree_link_and_target_settle_after_one_run() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("real.js"), "r()\n").unwrap();
        symlink(dir.path().join("real.js"), dir.path().join("alias.js")).unwrap();

        let config = ScanConfig::new(dir.path()).with_exclusions(ExclusionSet::new());
        let first = annotate_tree(&config).unwrap();
        assert_eq!(first.added, 1);

        let second = annotate_tree(&config).unwrap();
        assert_eq!(second.changed(), 0);
        assert_eq!(second.unchanged, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("real.js")).unwrap(),
            "// real.js\nr()\n"
        );
    }
}
