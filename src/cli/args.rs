//! CLI argument parsing.
//!
//! This module provides the argument parser for the mcviz CLI.
//! Extracted to enable comprehensive testing of argument parsing logic.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a visualization described by a YAML configuration file.
    Run {
        /// Path to the configuration YAML file.
        config_path: PathBuf,
        /// Optional seed override.
        seed_override: Option<u64>,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Approximate Euler's number with flag-based options.
    Euler {
        /// Simulation flags.
        flags: SimFlags,
    },
    /// Approximate pi with flag-based options.
    Pi {
        /// Simulation flags; `--method` selects area or chord sampling.
        flags: SimFlags,
    },
    /// Validate a configuration file without running anything.
    Validate {
        /// Path to the configuration YAML file.
        config_path: PathBuf,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

/// Flag-based overrides for the `euler` and `pi` commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimFlags {
    /// Sampling method (pi only).
    pub method: Option<String>,
    /// Samples per run.
    pub iterations: Option<usize>,
    /// Total run count.
    pub runs: Option<usize>,
    /// Batch size.
    pub batch_size: Option<usize>,
    /// Master seed.
    pub seed: Option<u64>,
    /// Present the figure interactively.
    pub show: bool,
    /// Skip saving the figure.
    pub no_save: bool,
    /// Output file path.
    pub output: Option<PathBuf>,
    /// Output resolution in dots per inch.
    pub dpi: Option<u32>,
    /// Enable verbose output.
    pub verbose: bool,
    /// Emit the run summary as JSON.
    pub json: bool,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
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

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "euler" | "e" => Command::Euler {
                flags: Self::parse_sim_flags(args, 2),
            },
            "pi" => Command::Pi {
                flags: Self::parse_sim_flags(args, 2),
            },
            "validate" => Self::parse_validate_command(args),
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
            eprintln!("Error: 'run' command requires a configuration path");
            return Command::Help;
        }

        let mut seed_override = None;
        let mut verbose = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    if i + 1 < args.len() {
                        if let Ok(seed) = args[i + 1].parse() {
                            seed_override = Some(seed);
                        }
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Run {
            config_path: PathBuf::from(&args[2]),
            seed_override,
            verbose,
        }
    }

    /// Parse the 'validate' command arguments.
    fn parse_validate_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'validate' command requires a configuration path");
            return Command::Help;
        }

        Command::Validate {
            config_path: PathBuf::from(&args[2]),
        }
    }

    /// Parse the flags shared by the 'euler' and 'pi' commands.
    fn parse_sim_flags(args: &[String], start: usize) -> SimFlags {
        let mut flags = SimFlags::default();

        let mut i = start;
        while i < args.len() {
            match args[i].as_str() {
                "--method" => {
                    if i + 1 < args.len() {
                        flags.method = Some(args[i + 1].clone());
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--iterations" => {
                    i = Self::parse_value(args, i, &mut flags.iterations);
                }
                "--runs" => {
                    i = Self::parse_value(args, i, &mut flags.runs);
                }
                "--batch-size" => {
                    i = Self::parse_value(args, i, &mut flags.batch_size);
                }
                "--seed" => {
                    i = Self::parse_value(args, i, &mut flags.seed);
                }
                "--dpi" => {
                    i = Self::parse_value(args, i, &mut flags.dpi);
                }
                "--output" | "-o" => {
                    if i + 1 < args.len() {
                        flags.output = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--show" => {
                    flags.show = true;
                    i += 1;
                }
                "--no-save" => {
                    flags.no_save = true;
                    i += 1;
                }
                "-v" | "--verbose" => {
                    flags.verbose = true;
                    i += 1;
                }
                "--json" => {
                    flags.json = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        flags
    }

    /// Parse one `--flag <value>` pair into `slot`, returning the next index.
    fn parse_value<T: std::str::FromStr>(
        args: &[String],
        i: usize,
        slot: &mut Option<T>,
    ) -> usize {
        if i + 1 < args.len() {
            if let Ok(value) = args[i + 1].parse() {
                *slot = Some(value);
            }
            i + 2
        } else {
            i + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_shows_help() {
        let args = Args::parse_from(["mcviz"]);
        assert_eq!(args.command, Command::Help);
    }

    #[test]
    fn test_unknown_command_shows_help() {
        let args = Args::parse_from(["mcviz", "frobnicate"]);
        assert_eq!(args.command, Command::Help);
    }

    #[test]
    fn test_help_aliases() {
        for flag in ["help", "-h", "--help"] {
            let args = Args::parse_from(["mcviz", flag]);
            assert_eq!(args.command, Command::Help);
        }
    }

    #[test]
    fn test_version_aliases() {
        for flag in ["version", "-V", "--version"] {
            let args = Args::parse_from(["mcviz", flag]);
            assert_eq!(args.command, Command::Version);
        }
    }

    #[test]
    fn test_run_command() {
        let args = Args::parse_from(["mcviz", "run", "viz.yaml"]);
        assert_eq!(
            args.command,
            Command::Run {
                config_path: PathBuf::from("viz.yaml"),
                seed_override: None,
                verbose: false,
            }
        );
    }

    #[test]
    fn test_run_command_with_overrides() {
        let args = Args::parse_from(["mcviz", "run", "viz.yaml", "--seed", "7", "-v"]);
        assert_eq!(
            args.command,
            Command::Run {
                config_path: PathBuf::from("viz.yaml"),
                seed_override: Some(7),
                verbose: true,
            }
        );
    }

    #[test]
    fn test_run_command_without_path_shows_help() {
        let args = Args::parse_from(["mcviz", "run"]);
        assert_eq!(args.command, Command::Help);
    }

    #[test]
    fn test_run_command_ignores_bad_seed() {
        let args = Args::parse_from(["mcviz", "run", "viz.yaml", "--seed", "banana"]);
        assert_eq!(
            args.command,
            Command::Run {
                config_path: PathBuf::from("viz.yaml"),
                seed_override: None,
                verbose: false,
            }
        );
    }

    #[test]
    fn test_euler_command_defaults() {
        let args = Args::parse_from(["mcviz", "euler"]);
        assert_eq!(
            args.command,
            Command::Euler {
                flags: SimFlags::default(),
            }
        );
    }

    #[test]
    fn test_euler_alias() {
        let args = Args::parse_from(["mcviz", "e"]);
        assert!(matches!(args.command, Command::Euler { .. }));
    }

    #[test]
    fn test_pi_command_full_flags() {
        let args = Args::parse_from([
            "mcviz",
            "pi",
            "--method",
            "chord",
            "--iterations",
            "50000",
            "--runs",
            "40",
            "--batch-size",
            "8",
            "--seed",
            "9",
            "--dpi",
            "150",
            "--output",
            "chord.png",
            "--show",
            "--no-save",
            "-v",
            "--json",
        ]);
        assert_eq!(
            args.command,
            Command::Pi {
                flags: SimFlags {
                    method: Some("chord".to_string()),
                    iterations: Some(50_000),
                    runs: Some(40),
                    batch_size: Some(8),
                    seed: Some(9),
                    show: true,
                    no_save: true,
                    output: Some(PathBuf::from("chord.png")),
                    dpi: Some(150),
                    verbose: true,
                    json: true,
                },
            }
        );
    }

    #[test]
    fn test_validate_command() {
        let args = Args::parse_from(["mcviz", "validate", "viz.yaml"]);
        assert_eq!(
            args.command,
            Command::Validate {
                config_path: PathBuf::from("viz.yaml"),
            }
        );
    }

    #[test]
    fn test_flag_value_missing_is_ignored() {
        let args = Args::parse_from(["mcviz", "pi", "--method"]);
        assert_eq!(
            args.command,
            Command::Pi {
                flags: SimFlags::default(),
            }
        );
    }
}
