//! Console summary printed after a run

use std::io::{self, Write};
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::RunSummary;

/// Print what the run did, with artifact paths shown relative to `root`
/// where possible.
pub fn print_summary(summary: &RunSummary, root: &Path, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);

    let mut path_color = ColorSpec::new();
    path_color.set_fg(Some(Color::Cyan));
    let mut warn_color = ColorSpec::new();
    warn_color.set_fg(Some(Color::Yellow));

    if let Some(annotate) = &summary.annotate {
        if annotate.changed() == 0 {
            writeln!(
                stdout,
                "File header comments: all {} up to date",
                annotate.unchanged
            )?;
        } else {
            writeln!(
                stdout,
                "File header comments: {} added, {} updated, {} up to date",
                annotate.added, annotate.updated, annotate.unchanged
            )?;
        }
        if annotate.failed > 0 {
            stdout.set_color(&warn_color)?;
            writeln!(stdout, "{} file(s) could not be annotated", annotate.failed)?;
            stdout.reset()?;
        }
    }

    if let Some(reports) = &summary.reports {
        write!(stdout, "Project structure data saved in ")?;
        stdout.set_color(&path_color)?;
        writeln!(stdout, "{}", display_path(&reports.json, root))?;
        stdout.reset()?;

        write!(stdout, "Project scope documentation generated in ")?;
        stdout.set_color(&path_color)?;
        writeln!(stdout, "{}", display_path(&reports.markdown, root))?;
        stdout.reset()?;

        writeln!(
            stdout,
            "{} directories, {} files",
            summary.dirs, summary.files
        )?;
    }

    Ok(())
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
