//! CLI command handlers.
//!
//! This module contains the execution logic for each CLI command.
//! Extracted to enable comprehensive testing of command behavior.

use std::path::Path;
use std::process::ExitCode;

use crate::config::{VizConfig, VizConfigBuilder};
use crate::error::McResult;
use crate::plot::ConvergenceFigure;
use crate::rng::SimRng;
use crate::runner::{run_and_plot, RunSummary};
use crate::simulate::Constant;

use super::output::{print_help, print_run_summary, print_summary_json, print_version};
use super::{Args, Command, SimFlags};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            config_path,
            seed_override,
            verbose,
        } => run_from_config(&config_path, seed_override, verbose),
        Command::Euler { flags } => run_from_flags("e", &flags),
        Command::Pi { flags } => run_from_flags("pi", &flags),
        Command::Validate { config_path } => validate_config(&config_path),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Run a visualization from a YAML configuration file.
#[must_use]
pub fn run_from_config(path: &Path, seed_override: Option<u64>, verbose: bool) -> ExitCode {
    let mut config = match VizConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if let Some(seed) = seed_override {
        config.simulation.seed = seed;
    }
    if verbose {
        config.verbose = true;
    }

    execute(&config, false)
}

/// Run a visualization from command-line flags.
#[must_use]
pub fn run_from_flags(constant: &str, flags: &SimFlags) -> ExitCode {
    let config = match build_config(constant, flags) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    execute(&config, flags.json)
}

/// Validate a configuration file without running anything.
#[must_use]
pub fn validate_config(path: &Path) -> ExitCode {
    match VizConfig::load(path) {
        Ok(config) => {
            println!("Configuration is valid: {}", path.display());
            println!(
                "  constant: {}, iterations: {}, runs: {}, batch_size: {}",
                config.constant,
                config.simulation.iterations,
                config.simulation.runs,
                config.simulation.batch_size
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Assemble a validated configuration from flag overrides.
fn build_config(constant: &str, flags: &SimFlags) -> McResult<VizConfig> {
    let mut builder = VizConfigBuilder::default().constant(constant);
    if let Some(method) = &flags.method {
        builder = builder.method(method.clone());
    }
    if let Some(iterations) = flags.iterations {
        builder = builder.iterations(iterations);
    }
    if let Some(runs) = flags.runs {
        builder = builder.runs(runs);
    }
    if let Some(batch_size) = flags.batch_size {
        builder = builder.batch_size(batch_size);
    }
    if let Some(seed) = flags.seed {
        builder = builder.seed(seed);
    }
    if let Some(output) = &flags.output {
        builder = builder.path(output.clone());
    }
    if let Some(dpi) = flags.dpi {
        builder = builder.dpi(dpi);
    }
    builder
        .save(!flags.no_save)
        .show(flags.show)
        .verbose(flags.verbose)
        .build()
}

/// Execute a validated configuration and report the result.
fn execute(config: &VizConfig, json: bool) -> ExitCode {
    match run(config) {
        Ok((_, summary)) => {
            let constant = config.constant.as_str();
            if json {
                print_summary_json(constant, &summary);
            } else {
                print_run_summary(constant, config, &summary);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Build the simulator and target from a configuration and run the batches.
fn run(config: &VizConfig) -> McResult<(ConvergenceFigure, RunSummary)> {
    let constant: Constant = config.parse_constant()?;
    let method = constant.parse_method(config.method.as_deref())?;
    let mut simulator =
        constant.simulator(config.method.as_deref(), SimRng::new(config.simulation.seed))?;
    let target = constant.target_with_method(method);
    run_and_plot(simulator.as_mut(), &target, &config.run_options())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use std::io::Write;

    #[test]
    fn test_help_and_version_succeed() {
        assert_eq!(
            run_cli(Args::parse_from(["mcviz", "help"])),
            ExitCode::SUCCESS
        );
        assert_eq!(
            run_cli(Args::parse_from(["mcviz", "version"])),
            ExitCode::SUCCESS
        );
    }

    #[test]
    fn test_run_missing_config_fails() {
        let code = run_cli(Args::parse_from(["mcviz", "run", "/nonexistent/viz.yaml"]));
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_validate_accepts_good_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "constant: e").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let code = run_cli(Args::parse_from(["mcviz", "validate", path.as_str()]));
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "constant: pi").unwrap();
        writeln!(file, "method: perimeter").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let code = run_cli(Args::parse_from(["mcviz", "validate", path.as_str()]));
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_euler_small_run_succeeds() {
        let code = run_cli(Args::parse_from([
            "mcviz",
            "euler",
            "--iterations",
            "500",
            "--runs",
            "4",
            "--batch-size",
            "2",
            "--no-save",
        ]));
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_pi_invalid_method_fails() {
        let code = run_cli(Args::parse_from([
            "mcviz",
            "pi",
            "--method",
            "perimeter",
            "--no-save",
        ]));
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_pi_chord_json_output_succeeds() {
        let code = run_cli(Args::parse_from([
            "mcviz",
            "pi",
            "--method",
            "chord",
            "--iterations",
            "500",
            "--runs",
            "4",
            "--batch-size",
            "2",
            "--no-save",
            "--json",
        ]));
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_non_divisible_flags_fail() {
        let code = run_cli(Args::parse_from([
            "mcviz",
            "euler",
            "--iterations",
            "500",
            "--runs",
            "5",
            "--batch-size",
            "2",
            "--no-save",
        ]));
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_run_from_config_file_with_seed_override() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("e.png");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "constant: e").unwrap();
        writeln!(file, "simulation:").unwrap();
        writeln!(file, "  iterations: 500").unwrap();
        writeln!(file, "  runs: 4").unwrap();
        writeln!(file, "  batch_size: 2").unwrap();
        writeln!(file, "output:").unwrap();
        writeln!(file, "  path: {}", out.display()).unwrap();
        writeln!(file, "  dpi: 72").unwrap();
        writeln!(file, "verbose: false").unwrap();

        let code = run_from_config(file.path(), Some(123), false);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.exists());
    }
}
