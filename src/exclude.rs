//! Exclusion rules for the tree walk
//!
//! An [`ExclusionSet`] combines four kinds of rule:
//!
//! - **directory tokens**, matched as plain substrings of the entry's path
//!   relative to the scan root (so `dist` excludes `dist/`, `src/dist.js`
//!   and `distro/` alike)
//! - **file names**, matched exactly against the entry's basename
//! - **glob patterns** from `.gitignore` lines such as `*.log`, matched
//!   against the basename, or against the whole relative path when the
//!   pattern contains a `/`
//! - **path prefixes**, matching one relative path and everything below it
//!   (used for the output directory)
//!
//! The set is assembled once with the consuming `with_*` methods and is
//! read-only afterwards.

use std::collections::HashSet;
use std::path::Path;

use glob::Pattern;

/// Directory tokens excluded unless the caller starts from [`ExclusionSet::new`].
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git", "node_modules"];

/// Lockfiles and OS clutter that carry no useful context.
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.lock",
    ".DS_Store",
];

const GITIGNORE: &str = ".gitignore";

#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    dir_tokens: Vec<String>,
    file_names: HashSet<String>,
    patterns: Vec<Pattern>,
    path_prefixes: Vec<String>,
}

impl ExclusionSet {
    /// An empty set that excludes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in directory and file exclusions.
    pub fn with_defaults() -> Self {
        Self::new()
            .with_dir_tokens(DEFAULT_EXCLUDED_DIRS.iter().copied())
            .with_file_names(DEFAULT_EXCLUDED_FILES.iter().copied())
    }

    pub fn with_dir_token(mut self, token: impl AsRef<str>) -> Self {
        let token = token.as_ref().trim();
        // An empty token is a substring of every path
        if !token.is_empty() && !self.dir_tokens.iter().any(|t| t == token) {
            self.dir_tokens.push(token.to_string());
        }
        self
    }

    pub fn with_dir_tokens<I, S>(self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens.into_iter().fold(self, |set, t| set.with_dir_token(t))
    }

    pub fn with_file_name(mut self, name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        if !name.is_empty() {
            self.file_names.insert(name.to_string());
        }
        self
    }

    pub fn with_file_names<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().fold(self, |set, n| set.with_file_name(n))
    }

    /// Add a glob pattern. Invalid patterns are dropped with a warning.
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        match Pattern::new(pattern) {
            Ok(p) => self.patterns.push(p),
            Err(e) => tracing::warn!(pattern, error = %e, "ignoring invalid exclusion pattern"),
        }
        self
    }

    /// Exclude `prefix` and everything below it, matched on whole path
    /// segments.
    pub fn with_path_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        let prefix = prefix.as_ref().trim_matches('/');
        if !prefix.is_empty() && !self.path_prefixes.iter().any(|p| p == prefix) {
            self.path_prefixes.push(prefix.to_string());
        }
        self
    }

    /// Fold one `.gitignore` line into the set.
    ///
    /// Blank lines, `#` comments and `!` negations are skipped. Leading and
    /// trailing slashes are stripped; lines with glob metacharacters become
    /// patterns and everything else becomes a directory token.
    pub fn with_gitignore_line(self, line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return self;
        }
        if line.starts_with('!') {
            tracing::debug!(line, "negated .gitignore entries are not supported, skipping");
            return self;
        }

        let entry = line.trim_start_matches('/').trim_end_matches('/');
        if entry.is_empty() {
            return self;
        }
        if is_glob(entry) {
            self.with_pattern(entry)
        } else {
            self.with_dir_token(entry)
        }
    }

    /// Fold the root's `.gitignore` into the set. A missing or unreadable
    /// file leaves the set unchanged.
    pub fn with_gitignore(self, root: &Path) -> Self {
        let path = root.join(GITIGNORE);
        match std::fs::read_to_string(&path) {
            Ok(content) => content
                .lines()
                .fold(self, |set, line| set.with_gitignore_line(line)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no .gitignore, using default exclusions");
                self
            }
        }
    }

    /// Check whether a root-relative, `/`-separated path is excluded.
    pub fn is_excluded(&self, relative: &str) -> bool {
        if self.dir_tokens.iter().any(|t| relative.contains(t.as_str())) {
            return true;
        }

        if self.path_prefixes.iter().any(|p| is_under(relative, p)) {
            return true;
        }

        let name = basename(relative);
        if self.file_names.contains(name) {
            return true;
        }

        self.patterns.iter().any(|p| {
            if p.as_str().contains('/') {
                p.matches(relative)
            } else {
                p.matches(name)
            }
        })
    }

    pub fn dir_tokens(&self) -> &[String] {
        &self.dir_tokens
    }

    pub fn file_names(&self) -> &HashSet<String> {
        &self.file_names
    }

    pub fn path_prefixes(&self) -> &[String] {
        &self.path_prefixes
    }
}

/// Split a comma-separated CLI list, trimming items and dropping empty ones.
pub fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn basename(relative: &str) -> &str {
    relative.rsplit('/').next().unwrap_or(relative)
}

fn is_under(relative: &str, prefix: &str) -> bool {
    relative
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn is_glob(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}
