//! CLI argument parsing.
//!
//! Hand-rolled so the parser can be driven from any iterator of strings
//! in tests, not just `std::env::args()`.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// How `run` prints the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON (the serialized [`Trajectory`](crate::engine::Trajectory)).
    #[default]
    Json,
    /// One CSV row per sample.
    Csv,
}

impl OutputFormat {
    fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Generate a trajectory and print it
    Run {
        /// Path to the scenario YAML file.
        scenario_path: PathBuf,
        /// Output format.
        format: OutputFormat,
        /// Optional timestep override (s).
        dt_override: Option<f64>,
        /// Enable debug logging.
        verbose: bool,
    },
    /// Print which motion model a scenario selects
    Classify {
        /// Path to the scenario YAML file.
        scenario_path: PathBuf,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// True when debug logging was requested.
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        matches!(self.command, Command::Run { verbose: true, .. })
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "classify" => Self::parse_classify_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse the 'run' command arguments.
    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'run' command requires a scenario path");
            return Command::Help;
        }

        let mut format = OutputFormat::default();
        let mut dt_override = None;
        let mut verbose = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--format" | "-f" => {
                    let Some(value) = args.get(i + 1) else {
                        eprintln!("Error: '--format' requires a value (json or csv)");
                        return Command::Help;
                    };
                    let Some(parsed) = OutputFormat::parse(value) else {
                        eprintln!("Error: unknown output format '{value}' (expected json or csv)");
                        return Command::Help;
                    };
                    format = parsed;
                    i += 2;
                }
                "--dt" => {
                    let parsed = args.get(i + 1).and_then(|value| value.parse::<f64>().ok());
                    let Some(dt) = parsed.filter(|dt| dt.is_finite() && *dt > 0.0) else {
                        eprintln!("Error: '--dt' requires a positive number of seconds");
                        return Command::Help;
                    };
                    dt_override = Some(dt);
                    i += 2;
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                other => {
                    eprintln!("Warning: ignoring unknown option '{other}'");
                    i += 1;
                }
            }
        }

        Command::Run {
            scenario_path: PathBuf::from(&args[2]),
            format,
            dt_override,
            verbose,
        }
    }

    /// Parse the 'classify' command arguments.
    fn parse_classify_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'classify' command requires a scenario path");
            return Command::Help;
        }

        Command::Classify {
            scenario_path: PathBuf::from(&args[2]),
        }
    }
}
