//! Comment syntax per file extension
//!
//! Maps a file extension to the delimiters used for the one-line path
//! header. Line-comment languages have an empty suffix; markup and
//! stylesheet languages close the comment on the same line.

use std::path::Path;

/// Comment delimiters wrapped around a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

const MARKUP: CommentSyntax = CommentSyntax::new("<!-- ", " -->");
const STYLESHEET: CommentSyntax = CommentSyntax::new("/*  ", "  */");
const SLASH: CommentSyntax = CommentSyntax::new("// ", "");
const HASH: CommentSyntax = CommentSyntax::new("# ", "");
const DASH: CommentSyntax = CommentSyntax::new("-- ", "");

impl CommentSyntax {
    pub const fn new(prefix: &'static str, suffix: &'static str) -> Self {
        Self { prefix, suffix }
    }

    /// Look up the syntax for an extension (without the dot, any case).
    ///
    /// Returns `None` for extensions that have no comment form or are not
    /// annotated, JSON included.
    ///
    /// ```
    /// use projscope::syntax::CommentSyntax;
    ///
    /// assert_eq!(CommentSyntax::for_extension("js").unwrap().prefix, "// ");
    /// assert_eq!(CommentSyntax::for_extension("HTML").unwrap().suffix, " -->");
    /// assert_eq!(CommentSyntax::for_extension("json"), None);
    /// ```
    pub fn for_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" | "html" | "htm" | "svelte" | "vue" | "xml" | "svg" => Some(MARKUP),
            "css" | "scss" | "sass" | "less" => Some(STYLESHEET),
            "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" | "mts" | "cts" => Some(SLASH),
            "rs" | "go" | "c" | "h" | "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Some(SLASH),
            "cs" | "java" | "kt" | "kts" | "swift" | "php" | "scala" | "dart" => Some(SLASH),
            "py" | "rb" | "sh" | "bash" | "zsh" | "fish" | "yaml" | "yml" | "toml" | "r" | "pl" => {
                Some(HASH)
            }
            "sql" | "lua" | "hs" => Some(DASH),
            _ => None,
        }
    }

    /// Look up the syntax for a path by its extension.
    pub fn for_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::for_extension(ext)
    }

    /// The header line for `relative`, including the trailing newline.
    pub fn header(&self, relative: &str) -> String {
        format!("{}{}{}\n", self.prefix, relative, self.suffix)
    }
}
