//! Batched simulation orchestration.
//!
//! [`run_and_plot`] drives a [`Simulator`] across batches of runs, bounds
//! memory to one batch's worth of trajectories, accumulates per-batch means
//! of the final estimates, and builds a [`ConvergenceFigure`] with every
//! run's warm-up-trimmed trace plus an emphasized reference overlay from the
//! last batch.
//!
//! Execution is fully sequential. Any simulator failure propagates
//! immediately and aborts the loop; nothing is saved on failure.

use std::path::PathBuf;

use crate::error::{McError, McResult};
use crate::plot::ConvergenceFigure;
use crate::rng::SimRng;
use crate::simulate::{Constant, Simulator, Target};

/// Iterations excluded from plotted traces. Early running averages swing
/// wildly and would dominate the axis scale.
const WARMUP_ITERATIONS: usize = 10;

/// Options controlling a batched run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Samples per simulation run.
    pub n_iterations: usize,
    /// Total number of runs; must be an exact multiple of `batch_size`.
    pub n_runs: usize,
    /// Runs held in memory at once.
    pub batch_size: usize,
    /// Print the overall estimate when done.
    pub verbose: bool,
    /// Persist the figure to `output_path`.
    pub save: bool,
    /// Present the figure in the platform image viewer.
    pub show: bool,
    /// Output file; defaults to `<print_name>.png` when saving.
    pub output_path: Option<PathBuf>,
    /// Output resolution in dots per inch.
    pub dpi: u32,
}

impl RunOptions {
    /// Start building options from the defaults.
    #[must_use]
    pub fn builder() -> RunOptionsBuilder {
        RunOptionsBuilder::default()
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptionsBuilder::default().build()
    }
}

/// Builder for [`RunOptions`].
#[derive(Debug, Clone)]
pub struct RunOptionsBuilder {
    options: RunOptions,
}

impl Default for RunOptionsBuilder {
    fn default() -> Self {
        Self {
            options: RunOptions {
                n_iterations: 1_000_000,
                n_runs: 200,
                batch_size: 10,
                verbose: false,
                save: false,
                show: false,
                output_path: None,
                dpi: 300,
            },
        }
    }
}

impl RunOptionsBuilder {
    /// Set samples per run.
    #[must_use]
    pub const fn n_iterations(mut self, n: usize) -> Self {
        self.options.n_iterations = n;
        self
    }

    /// Set the total run count.
    #[must_use]
    pub const fn n_runs(mut self, n: usize) -> Self {
        self.options.n_runs = n;
        self
    }

    /// Set the batch size.
    #[must_use]
    pub const fn batch_size(mut self, n: usize) -> Self {
        self.options.batch_size = n;
        self
    }

    /// Enable or disable the textual report.
    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.options.verbose = verbose;
        self
    }

    /// Enable or disable saving the figure.
    #[must_use]
    pub const fn save(mut self, save: bool) -> Self {
        self.options.save = save;
        self
    }

    /// Enable or disable interactive display.
    #[must_use]
    pub const fn show(mut self, show: bool) -> Self {
        self.options.show = show;
        self
    }

    /// Set the output file path.
    #[must_use]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output_path = Some(path.into());
        self
    }

    /// Set the output resolution.
    #[must_use]
    pub const fn dpi(mut self, dpi: u32) -> Self {
        self.options.dpi = dpi;
        self
    }

    /// Finish building. Divisibility is checked by [`run_and_plot`], not
    /// here, so options can be assembled freely before use.
    #[must_use]
    pub fn build(self) -> RunOptions {
        self.options
    }
}

/// Reused working storage for one batch of trajectories.
///
/// Holds a `batch_size x n_iterations` row-major matrix. Rows are
/// overwritten batch after batch, so peak memory depends on the batch size
/// and never on the total run count.
#[derive(Debug)]
pub struct BatchBuffer {
    batch_size: usize,
    n_iterations: usize,
    data: Vec<f64>,
}

impl BatchBuffer {
    /// Allocate storage for one batch.
    #[must_use]
    pub fn new(batch_size: usize, n_iterations: usize) -> Self {
        Self {
            batch_size,
            n_iterations,
            data: vec![0.0; batch_size * n_iterations],
        }
    }

    /// Rows per batch.
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Columns per row.
    #[must_use]
    pub const fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    /// Total elements held, fixed at `batch_size * n_iterations`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Overwrite one row with a run's trajectory.
    ///
    /// # Errors
    ///
    /// Returns [`McError::Simulator`] if the sequence length does not match
    /// the buffer's iteration count. A backend that hands back the wrong
    /// shape cannot be aggregated.
    pub fn set_row(&mut self, row: usize, sequence: &[f64]) -> McResult<()> {
        if sequence.len() != self.n_iterations {
            return Err(McError::simulator(format!(
                "expected sequence of {} values, got {}",
                self.n_iterations,
                sequence.len()
            )));
        }
        let start = row * self.n_iterations;
        self.data[start..start + self.n_iterations].copy_from_slice(sequence);
        Ok(())
    }

    /// One row's trajectory.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.n_iterations;
        &self.data[start..start + self.n_iterations]
    }

    /// Mean of the final-iteration estimates across all rows.
    #[must_use]
    pub fn final_mean(&self) -> f64 {
        let sum: f64 = (0..self.batch_size)
            .map(|r| self.row(r)[self.n_iterations - 1])
            .sum();
        sum / self.batch_size as f64
    }
}

/// Result of a completed batched run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Overall estimate: the mean of the per-batch means.
    pub estimate: f64,
    /// Per-batch means of the final-iteration estimates, in batch order.
    pub batch_means: Vec<f64>,
    /// Number of simulation runs completed.
    pub runs_completed: usize,
}

/// Run batched simulations and accumulate their convergence plot.
///
/// Preconditions are checked before the simulator is invoked at all:
/// iteration, run, and batch counts must be positive, and `n_runs` must be
/// an exact multiple of `batch_size`.
///
/// After the last batch, if the target carries a true value, every row of
/// that batch (warm-up included) is drawn with emphasis together with a
/// horizontal line at the true value. Saving and showing both happen
/// here when requested; the figure is also returned for further
/// composition.
///
/// # Errors
///
/// Returns [`McError::Config`] for precondition violations,
/// [`McError::Simulator`] if any run fails or returns the wrong sequence
/// length, and [`McError::Plot`] or [`McError::Io`] for output failures.
pub fn run_and_plot(
    simulator: &mut dyn Simulator,
    target: &Target,
    options: &RunOptions,
) -> McResult<(ConvergenceFigure, RunSummary)> {
    if options.n_iterations == 0 {
        return Err(McError::config("n_iterations must be positive"));
    }
    if options.n_runs == 0 || options.batch_size == 0 {
        return Err(McError::config("n_runs and batch_size must be positive"));
    }
    if options.n_runs % options.batch_size != 0 {
        return Err(McError::config(format!(
            "batch_size {} must evenly divide n_runs {}",
            options.batch_size, options.n_runs
        )));
    }

    let n_batches = options.n_runs / options.batch_size;
    let warmup = WARMUP_ITERATIONS.min(options.n_iterations);

    let mut figure = ConvergenceFigure::new(
        format!("Monte Carlo Approximation of {}", target.display_name),
        target.y_bounds,
    );
    let mut buffer = BatchBuffer::new(options.batch_size, options.n_iterations);
    let mut batch_means = Vec::with_capacity(n_batches);

    for _ in 0..n_batches {
        for row in 0..options.batch_size {
            let sequence = simulator.simulate(options.n_iterations)?;
            buffer.set_row(row, &sequence)?;
        }

        batch_means.push(buffer.final_mean());

        for row in 0..options.batch_size {
            figure.add_trace(warmup, buffer.row(row)[warmup..].to_vec());
        }
    }

    // The buffer now holds the last batch; all of its rows become the
    // emphasized overlay, warm-up included.
    if let Some(true_value) = target.true_value {
        let rows = (0..options.batch_size)
            .map(|row| buffer.row(row).to_vec())
            .collect();
        figure.set_reference(rows, true_value)?;
    }

    let estimate = batch_means.iter().sum::<f64>() / batch_means.len() as f64;

    if options.verbose {
        println!("{}", verbose_report(&target.display_name, estimate));
    }

    if options.save {
        let path = options
            .output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.png", target.print_name)));
        figure.render_png(&path, options.dpi)?;
    }
    if options.show {
        figure.present(options.dpi)?;
    }

    let summary = RunSummary {
        estimate,
        batch_means,
        runs_completed: options.n_runs,
    };
    Ok((figure, summary))
}

/// The verbose one-line report, constant named by its display name.
fn verbose_report(display_name: &str, estimate: f64) -> String {
    format!("Monte Carlo approximation of {display_name}: {estimate:.4}")
}

/// Approximate Euler's number and plot its convergence.
///
/// # Errors
///
/// Propagates any failure from [`run_and_plot`].
pub fn visualise_e(seed: u64, options: &RunOptions) -> McResult<(ConvergenceFigure, RunSummary)> {
    let mut simulator = Constant::Euler.simulator(None, SimRng::new(seed))?;
    let target = Constant::Euler.target();
    run_and_plot(simulator.as_mut(), &target, options)
}

/// Approximate pi with the given method and plot its convergence.
///
/// # Errors
///
/// Returns [`McError::InvalidMethod`] for an unsupported method name before
/// any simulation begins, and otherwise propagates any failure from
/// [`run_and_plot`].
pub fn visualise_pi(
    method: Option<&str>,
    seed: u64,
    options: &RunOptions,
) -> McResult<(ConvergenceFigure, RunSummary)> {
    let parsed = Constant::Pi.parse_method(method)?;
    let mut simulator = Constant::Pi.simulator(method, SimRng::new(seed))?;
    let target = Constant::Pi.target_with_method(parsed);
    run_and_plot(simulator.as_mut(), &target, options)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    struct ConstantStub {
        value: f64,
        n_iterations: usize,
    }

    impl Simulator for ConstantStub {
        fn name(&self) -> &'static str {
            "constant"
        }

        fn simulate(&mut self, _n_iterations: usize) -> McResult<Vec<f64>> {
            Ok(vec![self.value; self.n_iterations])
        }
    }

    proptest! {
        /// Falsification: a constant-valued backend yields that exact value
        /// as the overall estimate for any divisible configuration.
        #[test]
        fn prop_constant_estimate_exact(
            value in -1000.0f64..1000.0,
            batch_size in 1usize..8,
            n_batches in 1usize..8,
        ) {
            let n_runs = batch_size * n_batches;
            let mut stub = ConstantStub { value, n_iterations: 20 };
            let opts = RunOptions::builder()
                .n_iterations(20)
                .n_runs(n_runs)
                .batch_size(batch_size)
                .build();

            let target = Target {
                display_name: "c".to_string(),
                print_name: "c".to_string(),
                true_value: None,
                y_bounds: (-1000.0, 1000.0),
            };
            let result = run_and_plot(&mut stub, &target, &opts);
            prop_assert!(result.is_ok());
            let (_, summary) = result.map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(summary.batch_means.len(), n_batches);
            prop_assert!((summary.estimate - value).abs() < 1e-9);
        }
    }
}
