//! CLI command handlers.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};

use super::args::OutputFormat;
use super::output::{print_help, print_version, write_trajectory};
use super::scenario_file::ScenarioFile;
use super::{Args, Command};
use crate::engine::{Trajectory, TrajectoryGenerator};
use crate::error::SimResult;
use crate::scenarios::MotionModelKind;

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    let result = match args.command {
        Command::Run {
            scenario_path,
            format,
            dt_override,
            ..
        } => {
            let stdout = std::io::stdout();
            run_scenario(&scenario_path, format, dt_override, &mut stdout.lock()).map(|_| ())
        }
        Command::Classify { scenario_path } => classify_scenario(&scenario_path).map(|kind| println!("{kind}")),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Generate the trajectory for a scenario file and write it to `out`.
///
/// # Errors
///
/// Returns error if the file cannot be loaded, the timestep override is
/// invalid, generation is stopped by the Jidoka guard, or writing fails.
pub fn run_scenario<W: Write>(
    path: &Path,
    format: OutputFormat,
    dt_override: Option<f64>,
    out: &mut W,
) -> SimResult<Trajectory> {
    let mut file = ScenarioFile::load(path)?;
    if let Some(dt) = dt_override {
        file.engine.timestep.dt = dt;
    }

    let generator = TrajectoryGenerator::new(file.engine)?;
    info!(
        scenario = %path.display(),
        dt = generator.config().dt(),
        "generating trajectory"
    );

    let trajectory = generator.generate(&file.parameters)?;
    info!(
        kind = %trajectory.kind(),
        samples = trajectory.len(),
        termination = %trajectory.termination(),
        "trajectory generated"
    );

    write_trajectory(&trajectory, format, out)?;
    Ok(trajectory)
}

/// Load a scenario file and classify its parameters.
///
/// # Errors
///
/// Returns error if the file cannot be loaded.
pub fn classify_scenario(path: &Path) -> SimResult<MotionModelKind> {
    let file = ScenarioFile::load(path)?;
    Ok(MotionModelKind::classify(&file.parameters))
}
