//! # mcviz
//!
//! Monte Carlo approximation of mathematical constants, with convergence
//! visualization.
//!
//! Two thin, collaborating pieces:
//! - a [`simulate::Simulator`] capability producing the length-N sequence of
//!   running-average estimates for one simulation run of a named constant
//!   (Euler's number, or pi via the area or chord method);
//! - a batch runner ([`runner::run_and_plot`]) that invokes the simulator
//!   across batches of runs, tracks per-batch means of the final estimates,
//!   accumulates every run's trajectory onto a shared plot, and overlays the
//!   true constant value as a reference line on the last batch.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mcviz::prelude::*;
//!
//! let mut sim = Constant::Euler.simulator(None, SimRng::new(42))?;
//! let target = Constant::Euler.target();
//! let opts = RunOptions::builder()
//!     .n_iterations(100_000)
//!     .n_runs(20)
//!     .batch_size(10)
//!     .build();
//! let (figure, summary) = run_and_plot(sim.as_mut(), &target, &opts)?;
//! assert_eq!(summary.batch_means.len(), 2);
//! # drop(figure);
//! # Ok::<(), mcviz::McError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,
    clippy::needless_range_loop,
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod plot;
pub mod rng;
pub mod runner;
pub mod simulate;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{VizConfig, VizConfigBuilder};
    pub use crate::error::{McError, McResult};
    pub use crate::plot::ConvergenceFigure;
    pub use crate::rng::SimRng;
    pub use crate::runner::{run_and_plot, RunOptions, RunSummary};
    pub use crate::simulate::{Constant, PiMethod, Simulator};
}

/// Re-export for public API
pub use error::{McError, McResult};
