//! projscope - stamp source files with their project path and snapshot the
//! tree as JSON and Markdown

pub mod annotate;
pub mod config;
pub mod error;
pub mod exclude;
pub mod logging;
pub mod output;
pub mod syntax;
pub mod tree;

#[cfg(feature = "test-utils")]
pub mod test_utils;

use std::path::PathBuf;

pub use annotate::{
    AnnotateSummary, Annotation, HeaderAnnotator, annotate_content, annotate_file, annotate_tree,
};
pub use config::{RunMode, ScanConfig};
pub use error::{AnnotateError, ScanError};
pub use exclude::ExclusionSet;
pub use output::{JsonReport, MarkdownReport, print_summary, write_report};
pub use syntax::CommentSyntax;
pub use tree::{Entry, TreeVisitor, TreeWalker, WalkStats};

/// Paths of the reports written by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub markdown: PathBuf,
}

/// What a run did.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub annotate: Option<AnnotateSummary>,
    pub reports: Option<ReportPaths>,
    /// Files included in the reports.
    pub files: usize,
    /// Directories included in the reports.
    pub dirs: usize,
}

/// Render both reports in memory.
///
/// Each report is built by its own walk. Nothing is written here, so a
/// failure leaves no artifacts behind.
pub fn render_reports(config: &ScanConfig) -> error::Result<(String, String, WalkStats)> {
    let walker = TreeWalker::new(config.root(), config.exclusions());

    let mut json = JsonReport::new();
    let stats = walker.walk(&mut json)?;

    let mut markdown = MarkdownReport::new();
    walker.walk(&mut markdown)?;

    Ok((json.render()?, markdown.render(), stats))
}

/// Run the configured passes: annotate headers, then render and write both
/// reports.
pub fn run(config: &ScanConfig) -> error::Result<RunSummary> {
    let mut summary = RunSummary::default();

    if config.mode().annotates() {
        let annotated = annotate_tree(config)?;
        tracing::info!(
            added = annotated.added,
            updated = annotated.updated,
            failed = annotated.failed,
            "header pass finished"
        );
        summary.annotate = Some(annotated);
    }

    if config.mode().writes_reports() {
        let (json, markdown, stats) = render_reports(config)?;
        let paths = ReportPaths {
            json: config.json_path(),
            markdown: config.markdown_path(),
        };
        write_report(&paths.json, &json)?;
        write_report(&paths.markdown, &markdown)?;
        tracing::debug!(
            files = stats.files,
            dirs = stats.dirs,
            excluded = stats.excluded,
            "reports written"
        );

        summary.files = stats.files;
        summary.dirs = stats.dirs;
        summary.reports = Some(paths);
    }

    Ok(summary)
}
