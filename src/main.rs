//! mechsim CLI - deterministic mechanics trajectories
//!
//! All logic lives in the library's `cli` module; this binary only installs
//! the log subscriber and dispatches.

use std::process::ExitCode;

use mechsim::cli::{run_cli, Args};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mechsim=info"));
    if verbose {
        if let Ok(directive) = "mechsim=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }

    // Logs go to stderr so trajectories on stdout stay machine-readable.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.is_verbose());
    run_cli(args)
}
