//! Run configuration
//!
//! One [`ScanConfig`] is built at startup and passed by reference to every
//! pass. It owns the scan root, where reports go, the run's timestamp, and
//! the exclusion set.

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::exclude::ExclusionSet;
use crate::tree::relative_path;

/// Default output directory, relative to the scan root.
pub const DEFAULT_OUTPUT_DIR: &str = "projectContext";

const JSON_SUBDIR: &str = "json";
const MARKDOWN_SUBDIR: &str = "markdown";

/// Which passes a run performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Annotate headers, then write both reports.
    #[default]
    Full,
    /// Only annotate headers.
    AnnotateOnly,
    /// Only write reports; source files are not touched.
    ReportsOnly,
}

impl RunMode {
    pub fn annotates(self) -> bool {
        matches!(self, RunMode::Full | RunMode::AnnotateOnly)
    }

    pub fn writes_reports(self) -> bool {
        matches!(self, RunMode::Full | RunMode::ReportsOnly)
    }
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    root: PathBuf,
    output_dir: PathBuf,
    timestamp: String,
    /// Exclusions as given by the caller.
    base_exclusions: ExclusionSet,
    /// `base_exclusions` plus the output directory.
    exclusions: ExclusionSet,
    mode: RunMode,
}

impl ScanConfig {
    /// Configuration for `root` with default exclusions, the default output
    /// directory and the current time as timestamp.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut config = Self {
            output_dir: root.join(DEFAULT_OUTPUT_DIR),
            root,
            timestamp: timestamp_now(),
            base_exclusions: ExclusionSet::with_defaults(),
            exclusions: ExclusionSet::new(),
            mode: RunMode::default(),
        };
        config.refresh_exclusions();
        config
    }

    /// Set the output directory. Relative paths are resolved against the
    /// root, and `.`/`..` components are folded away.
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = normalize(&self.root.join(dir));
        self.refresh_exclusions();
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Replace the exclusion set.
    ///
    /// When the output directory lies under the root it is added as a path
    /// prefix, so earlier reports never end up in new ones.
    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.base_exclusions = exclusions;
        self.refresh_exclusions();
        self
    }

    fn refresh_exclusions(&mut self) {
        let base = self.base_exclusions.clone();
        self.exclusions = match relative_path(&self.root, &self.output_dir) {
            Some(rel) if !rel.is_empty() => base.with_path_prefix(rel),
            _ => base,
        };
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// `<output>/json/projectStructure_<timestamp>.json`
    pub fn json_path(&self) -> PathBuf {
        self.output_dir
            .join(JSON_SUBDIR)
            .join(format!("projectStructure_{}.json", self.timestamp))
    }

    /// `<output>/markdown/projectScope_<timestamp>.md`
    pub fn markdown_path(&self) -> PathBuf {
        self.output_dir
            .join(MARKDOWN_SUBDIR)
            .join(format!("projectScope_{}.md", self.timestamp))
    }
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Current UTC time as a sortable, filesystem-safe timestamp.
pub fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

/// RFC 3339 with milliseconds, with `:` and `.` replaced by `-`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use projscope::config::format_timestamp;
///
/// let t = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 12).unwrap();
/// assert_eq!(format_timestamp(t), "2024-05-01T09-30-12-000Z");
/// ```
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}
