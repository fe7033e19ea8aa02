//! Logging setup
//!
//! Library code logs through `tracing`; the binary installs a `fmt`
//! subscriber on stderr so stdout stays free for the run summary.
//! `PROJSCOPE_LOG` takes any `EnvFilter` directive and overrides the
//! verbosity flags.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit filter directive.
pub const LOG_ENV: &str = "PROJSCOPE_LOG";

/// Map `-v` / `-q` counts to a level name. Quiet wins over verbose.
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn build_env_filter(verbose: u8, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(format!("projscope={}", level_for(verbose, quiet)))
    })
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(verbose: u8, quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
