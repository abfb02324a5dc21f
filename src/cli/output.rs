//! CLI output formatting.
//!
//! This module contains all output formatting functions for the CLI.
//! Extracted to enable testing of output generation.

use crate::config::VizConfig;
use crate::runner::RunSummary;

/// Print version information, including the commit embedded at build time
/// when one was available.
pub fn print_version() {
    println!("mcviz {}", env!("MCVIZ_VERSION"));
    if let Some(hash) = option_env!("GIT_HASH") {
        if !hash.is_empty() {
            println!("commit {hash}");
        }
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"mcviz - Monte Carlo approximation of mathematical constants

USAGE:
    mcviz <COMMAND> [OPTIONS]

COMMANDS:
    run <config.yaml>           Run a visualization from a YAML configuration
        --seed <N>              Override the configured seed
        -v, --verbose           Enable verbose output

    euler                       Approximate Euler's number
    pi                          Approximate pi
        --method <area|chord>   Sampling method (pi only, default: area)

      Shared flags for 'euler' and 'pi':
        --iterations <N>        Samples per run (default: 1000000)
        --runs <N>              Total runs (default: 200)
        --batch-size <N>        Runs held in memory at once (default: 10)
        --seed <N>              Master seed (default: 42)
        --output <FILE>, -o     Output file (default: <constant>.png)
        --dpi <N>               Output resolution (default: 300)
        --show                  Open the figure in the image viewer
        --no-save               Skip saving the figure
        --json                  Emit the run summary as JSON
        -v, --verbose           Enable verbose output

    validate <config.yaml>      Validate a configuration file

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    mcviz euler
    mcviz pi --method chord --runs 40 --batch-size 8
    mcviz run configs/pi_chord.yaml --seed 12345
"
    );
}

/// Print the run summary in human-readable form.
pub fn print_run_summary(constant: &str, config: &VizConfig, summary: &RunSummary) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Constant:   {constant}");
    if let Some(method) = &config.method {
        println!("Method:     {method}");
    }
    println!("Seed:       {}", config.simulation.seed);
    println!("Iterations: {}", config.simulation.iterations);
    println!(
        "Runs:       {} ({} batches of {})",
        summary.runs_completed,
        summary.batch_means.len(),
        config.simulation.batch_size
    );
    println!("Estimate:   {:.4}", summary.estimate);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

/// Print the run summary as JSON.
pub fn print_summary_json(constant: &str, summary: &RunSummary) {
    let payload = serde_json::json!({
        "constant": constant,
        "estimate": summary.estimate,
        "batch_means": summary.batch_means,
        "runs_completed": summary.runs_completed,
    });
    match serde_json::to_string_pretty(&payload) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Error: failed to serialize summary: {e}"),
    }
}
