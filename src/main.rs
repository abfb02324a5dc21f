//! mcviz CLI - Monte Carlo approximation of mathematical constants.
//!
//! Command-line interface for running batched simulations and rendering
//! their convergence plots.

use std::process::ExitCode;

use mcviz::cli::{run_cli, Args};

fn main() -> ExitCode {
    run_cli(Args::parse())
}
