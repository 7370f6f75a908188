//! CLI module tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::args::{Args, Command, OutputFormat};
use super::commands::{classify_scenario, run_cli, run_scenario};
use super::output::{print_help, print_version, version_string, write_trajectory};
use super::scenario_file::ScenarioFile;
use crate::engine::Termination;
use crate::error::SimError;
use crate::scenarios::MotionModelKind;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn write_scenario(dir: &Path, name: &str, yaml: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, yaml).unwrap();
    path
}

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_no_args_shows_help() {
    let args = Args::parse_from(["mechsim"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_help_variants() {
    for flag in ["-h", "--help", "help"] {
        assert_eq!(Args::parse_from(["mechsim", flag]).command, Command::Help);
    }
}

#[test]
fn test_parse_version_variants() {
    for flag in ["-V", "--version", "version"] {
        assert_eq!(Args::parse_from(["mechsim", flag]).command, Command::Version);
    }
}

#[test]
fn test_parse_unknown_command() {
    let args = Args::parse_from(["mechsim", "simulate"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_run_defaults() {
    let args = Args::parse_from(["mechsim", "run", "scenario.yaml"]);
    assert_eq!(
        args.command,
        Command::Run {
            scenario_path: PathBuf::from("scenario.yaml"),
            format: OutputFormat::Json,
            dt_override: None,
            verbose: false,
        }
    );
    assert!(!args.is_verbose());
}

#[test]
fn test_parse_run_with_options() {
    let args = Args::parse_from(["mechsim", "run", "s.yaml", "--format", "CSV", "--dt", "0.01", "-v"]);
    match args.command {
        Command::Run {
            format,
            dt_override,
            verbose,
            ..
        } => {
            assert_eq!(format, OutputFormat::Csv);
            assert_eq!(dt_override, Some(0.01));
            assert!(verbose);
        }
        other => panic!("Expected Run command, got {other:?}"),
    }
}

#[test]
fn test_parse_run_verbose_long_flag() {
    let args = Args::parse_from(["mechsim", "run", "s.yaml", "--verbose"]);
    assert!(args.is_verbose());
}

#[test]
fn test_parse_run_missing_path() {
    let args = Args::parse_from(["mechsim", "run"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_run_bad_format() {
    let args = Args::parse_from(["mechsim", "run", "s.yaml", "--format", "xml"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_run_format_without_value() {
    let args = Args::parse_from(["mechsim", "run", "s.yaml", "-f"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_run_bad_dt() {
    for dt in ["abc", "-0.1", "0", "NaN"] {
        let args = Args::parse_from(["mechsim", "run", "s.yaml", "--dt", dt]);
        assert_eq!(args.command, Command::Help, "dt={dt}");
    }
}

#[test]
fn test_parse_run_ignores_unknown_option() {
    let args = Args::parse_from(["mechsim", "run", "s.yaml", "--seed", "-v"]);
    assert!(args.is_verbose());
}

#[test]
fn test_parse_classify() {
    let args = Args::parse_from(["mechsim", "classify", "s.yaml"]);
    assert_eq!(
        args.command,
        Command::Classify {
            scenario_path: PathBuf::from("s.yaml")
        }
    );
}

#[test]
fn test_parse_classify_missing_path() {
    let args = Args::parse_from(["mechsim", "classify"]);
    assert_eq!(args.command, Command::Help);
}

// ============================================================================
// Scenario file tests
// ============================================================================

#[test]
fn test_scenario_file_parameters_only() {
    let file = ScenarioFile::from_yaml("parameters:\n  inclineAngle: 30\n  friction: 0.2\n").unwrap();
    assert_eq!(file.parameters.len(), 2);
    assert!((file.engine.dt() - 0.02).abs() < f64::EPSILON);
}

#[test]
fn test_scenario_file_empty_is_default() {
    let file = ScenarioFile::from_yaml("{}").unwrap();
    assert_eq!(file, ScenarioFile::default());
}

#[test]
fn test_scenario_file_engine_section() {
    let yaml = r"
engine:
  timestep:
    dt: 0.01
    max_duration: 2.0
parameters:
  objectType: pendulum
  length: 2
";
    let file = ScenarioFile::from_yaml(yaml).unwrap();
    assert!((file.engine.dt() - 0.01).abs() < f64::EPSILON);
    assert!(file.parameters.is_pendulum());
}

#[test]
fn test_scenario_file_rejects_text_parameter() {
    let err = ScenarioFile::from_yaml("parameters:\n  velocity: fast\n").unwrap_err();
    assert!(matches!(err, SimError::YamlParse(_)));
    assert!(err.to_string().contains("velocity"));
}

#[test]
fn test_scenario_file_rejects_unknown_section() {
    assert!(ScenarioFile::from_yaml("params:\n  velocity: 3\n").is_err());
}

#[test]
fn test_scenario_file_rejects_invalid_engine() {
    let err = ScenarioFile::from_yaml("engine:\n  timestep:\n    dt: 2.0\n").unwrap_err();
    assert!(matches!(err, SimError::Validation(_)));
}

#[test]
fn test_scenario_file_rejects_excessive_sample_count() {
    let yaml = "engine:\n  timestep:\n    dt: 0.000001\n    max_duration: 3600\n";
    let err = ScenarioFile::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, SimError::Config { .. }));
}

#[test]
fn test_run_scenario_rejects_excessive_dt_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(
        dir.path(),
        "long.yaml",
        "engine:\n  timestep:\n    max_duration: 3600\nparameters: {}\n",
    );
    let mut out = Vec::new();
    let err = run_scenario(&path, OutputFormat::Json, Some(0.000_001), &mut out).unwrap_err();
    assert!(matches!(err, SimError::Config { .. }));
    assert!(out.is_empty());
}

#[test]
fn test_scenario_file_not_found() {
    let err = ScenarioFile::load("does/not/exist.yaml").unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}

// ============================================================================
// Command tests
// ============================================================================

#[test]
fn test_run_scenario_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(dir.path(), "throw.yaml", "parameters:\n  velocity: 10\n  angle: 90\n");

    let mut out = Vec::new();
    let trajectory = run_scenario(&path, OutputFormat::Json, None, &mut out).unwrap();
    assert_eq!(trajectory.kind(), MotionModelKind::Projectile);
    assert_eq!(trajectory.termination(), Termination::Floor);

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["kind"], "projectile");
    assert_eq!(json["termination"], "floor");
    assert_eq!(json["samples"].as_array().unwrap().len(), trajectory.len());
    assert!(json["samples"][0].get("kineticEnergy").is_some());
    assert!(json["samples"][0].get("companion").is_none());
}

#[test]
fn test_run_scenario_csv_two_body() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(
        dir.path(),
        "stacked.yaml",
        "parameters:\n  mass: 2\n  mass2: 3\n  force: 14\n  friction: 0.3\n",
    );

    let mut out = Vec::new();
    let trajectory = run_scenario(&path, OutputFormat::Csv, None, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap();

    assert!(header.starts_with("time,positionX,positionY"));
    assert!(header.contains("companion.positionX"));
    assert_eq!(lines.count(), trajectory.len());
}

#[test]
fn test_run_scenario_dt_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(dir.path(), "pendulum.yaml", "parameters:\n  objectType: pendulum\n");

    let mut out = Vec::new();
    let trajectory = run_scenario(&path, OutputFormat::Json, Some(0.1), &mut out).unwrap();
    assert!((trajectory.dt() - 0.1).abs() < f64::EPSILON);
    assert_eq!(trajectory.len(), 101);
}

#[test]
fn test_run_scenario_rejects_oversized_dt() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(dir.path(), "p.yaml", "parameters: {}\n");
    let mut out = Vec::new();
    assert!(run_scenario(&path, OutputFormat::Json, Some(5.0), &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn test_run_scenario_jidoka_stop() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(dir.path(), "bad.yaml", "parameters:\n  mass: -1\n  velocity: 5\n");
    let mut out = Vec::new();
    let err = run_scenario(&path, OutputFormat::Json, None, &mut out).unwrap_err();
    assert!(err.is_jidoka_violation());
}

#[test]
fn test_classify_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scenario(dir.path(), "pulley.yaml", "parameters:\n  inclineAngle: 30\n  mass2: 1\n");
    assert_eq!(classify_scenario(&path).unwrap(), MotionModelKind::InclinePulley);
}

#[test]
fn test_run_cli_exit_codes() {
    assert_eq!(run_cli(Args::parse_from(["mechsim", "help"])), ExitCode::SUCCESS);
    assert_eq!(run_cli(Args::parse_from(["mechsim", "version"])), ExitCode::SUCCESS);
    assert_eq!(
        run_cli(Args::parse_from(["mechsim", "classify", "missing.yaml"])),
        ExitCode::from(1)
    );
    assert_eq!(
        run_cli(Args::parse_from(["mechsim", "run", "missing.yaml"])),
        ExitCode::from(1)
    );
}

// ============================================================================
// Output tests
// ============================================================================

#[test]
fn test_version_string() {
    assert!(version_string().starts_with(&format!("mechsim {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_print_functions_do_not_panic() {
    print_help();
    print_version();
}

#[test]
fn test_write_trajectory_json_roundtrip() {
    let params = crate::scenarios::ScenarioParameters::from_pairs([("force", 3.0)]).unwrap();
    let trajectory = crate::generate_trajectory(&params).unwrap();

    let mut out = Vec::new();
    write_trajectory(&trajectory, OutputFormat::Json, &mut out).unwrap();
    let restored: crate::engine::Trajectory = serde_json::from_slice(&out).unwrap();
    assert_eq!(restored.kind(), trajectory.kind());
    assert_eq!(restored.termination(), trajectory.termination());
    assert_eq!(restored.len(), trajectory.len());
    let (a, b) = (restored.last().unwrap(), trajectory.last().unwrap());
    assert!((a.position_x - b.position_x).abs() < 1e-9);
}
