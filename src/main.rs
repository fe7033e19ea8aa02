//! CLI entry point for projscope

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use projscope::config::DEFAULT_OUTPUT_DIR;
use projscope::exclude::parse_list;
use projscope::logging::init_logging;
use projscope::{ExclusionSet, RunMode, ScanConfig, print_summary, run};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "projscope")]
#[command(about = "Stamp source files with their project path and snapshot the tree as JSON and Markdown")]
#[command(version)]
struct Args {
    /// Project root to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Comma-separated list of additional directories to exclude (substring match)
    #[arg(short = 'e', long = "exclude", value_name = "DIRS")]
    exclude: Option<String>,

    /// Comma-separated list of additional file names to exclude (exact match)
    #[arg(short = 'f', long = "exclude-files", value_name = "FILES")]
    exclude_files: Option<String>,

    /// Where reports are written, relative to the project root
    #[arg(short = 'o', long = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Write reports without touching source files
    #[arg(long = "no-annotate", conflicts_with = "annotate_only")]
    no_annotate: bool,

    /// Only add or refresh header comments; write no reports
    #[arg(long = "annotate-only")]
    annotate_only: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn mode(&self) -> RunMode {
        match (self.no_annotate, self.annotate_only) {
            (true, _) => RunMode::ReportsOnly,
            (false, true) => RunMode::AnnotateOnly,
            (false, false) => RunMode::Full,
        }
    }

    fn exclusions(&self, root: &std::path::Path) -> ExclusionSet {
        let extra_dirs = self.exclude.as_deref().map(parse_list).unwrap_or_default();
        let extra_files = self
            .exclude_files
            .as_deref()
            .map(parse_list)
            .unwrap_or_default();

        ExclusionSet::with_defaults()
            .with_gitignore(root)
            .with_dir_tokens(extra_dirs)
            .with_file_names(extra_files)
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let root = match args.path.canonicalize() {
        Ok(p) if p.is_dir() => p,
        Ok(_) => {
            eprintln!("projscope: '{}' is not a directory", args.path.display());
            process::exit(1);
        }
        Err(e) => {
            eprintln!("projscope: cannot access '{}': {}", args.path.display(), e);
            process::exit(1);
        }
    };

    let config = ScanConfig::new(&root)
        .with_output_dir(&args.output_dir)
        .with_exclusions(args.exclusions(&root))
        .with_mode(args.mode());

    let summary = match run(&config) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("projscope: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = print_summary(&summary, &root, should_use_color(args.color)) {
        eprintln!("projscope: error writing output: {}", e);
        process::exit(1);
    }
}
