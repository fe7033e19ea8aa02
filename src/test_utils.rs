//! Test utilities for building temporary project trees.
//!
//! This module is only compiled with the `test-utils` feature, for tests
//! and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary project directory.
///
/// The directory is removed when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.dir.path().join(path)).expect("Failed to read file")
    }

    /// The single report file in `<output>/<kind>/`, e.g. `kind = "json"`.
    pub fn only_report(&self, output_dir: &str, kind: &str) -> PathBuf {
        let dir = self.dir.path().join(output_dir).join(kind);
        let mut reports: Vec<_> = fs::read_dir(&dir)
            .expect("Failed to read report dir")
            .map(|e| e.expect("Failed to read entry").path())
            .collect();
        assert_eq!(reports.len(), 1, "expected one report in {}", dir.display());
        reports.remove(0)
    }

    /// All reports in `<output>/<kind>/`, oldest first.
    pub fn reports(&self, output_dir: &str, kind: &str) -> Vec<PathBuf> {
        let dir = self.dir.path().join(output_dir).join(kind);
        let mut reports: Vec<_> = match fs::read_dir(&dir) {
            Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
            Err(_) => Vec::new(),
        };
        reports.sort();
        reports
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
