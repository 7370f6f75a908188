//! CLI output formatting.

use std::io::Write;

use super::args::OutputFormat;
use crate::engine::Trajectory;
use crate::error::SimResult;

/// Version string, with the short git hash when built from a checkout.
#[must_use]
pub fn version_string() -> String {
    let hash = env!("MECHSIM_GIT_HASH");
    if hash.is_empty() {
        format!("mechsim {}", env!("MECHSIM_VERSION"))
    } else {
        format!("mechsim {} ({hash})", env!("MECHSIM_VERSION"))
    }
}

/// Print version information.
pub fn print_version() {
    println!("{}", version_string());
}

/// Print help message.
pub fn print_help() {
    println!(
        r"mechsim - Deterministic mechanics trajectories

USAGE:
    mechsim <COMMAND> [OPTIONS]

COMMANDS:
    run <scenario.yaml>         Generate a trajectory and print it
        -f, --format <FMT>      Output format: json (default) or csv
        --dt <SECONDS>          Override the timestep
        -v, --verbose           Enable debug logging

    classify <scenario.yaml>    Print the motion model the scenario selects

    help                        Show this help message
    version                     Show version information

SCENARIO FILE:
    engine:                     Optional engine configuration
      timestep: {{ dt: 0.02, max_duration: 10.0 }}
    parameters:                 Flat map of numbers (angles in degrees)
      inclineAngle: 30
      friction: 0.2

EXAMPLES:
    mechsim run scenarios/incline.yaml
    mechsim run scenarios/pendulum.yaml --format csv --dt 0.01
    mechsim classify scenarios/stacked.yaml

LOGGING:
    Set RUST_LOG (e.g. RUST_LOG=mechsim=debug) to control log output.
"
    );
}

/// Write a trajectory in the requested format.
///
/// # Errors
///
/// Returns error if serialization or writing fails.
pub fn write_trajectory<W: Write>(trajectory: &Trajectory, format: OutputFormat, out: &mut W) -> SimResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, trajectory)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => out.write_all(trajectory.to_csv().as_bytes())?,
    }
    out.flush()?;
    Ok(())
}
