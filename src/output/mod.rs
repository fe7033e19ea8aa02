//! Report rendering and writing
//!
//! - `json` - nested project structure
//! - `markdown` - flat project scope document
//! - `summary` - console summary printed after a run

mod json;
mod markdown;
mod summary;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScanError};

pub use json::JsonReport;
pub use markdown::MarkdownReport;
pub use summary::print_summary;

/// Read a file for inclusion in a report.
///
/// Invalid UTF-8 is replaced rather than rejected, so a stray binary file
/// does not abort the run.
pub(crate) fn read_content(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| ScanError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Write a report, creating parent directories as needed.
///
/// The content goes to a temporary sibling first and is renamed into place,
/// so a reader never sees a half-written report.
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ScanError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let tmp = temp_sibling(path);
    let write_err = |source| ScanError::WriteReport {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp, content).map_err(write_err)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
