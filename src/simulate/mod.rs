//! Simulation capability for constant approximation.
//!
//! The numerical kernels live behind the [`Simulator`] trait: one invocation
//! produces the full sequence of running-average estimates for a single run.
//! The batch runner only ever calls [`Simulator::simulate`] and copies the
//! output; it never inspects how the estimates are produced, so backends are
//! swappable (the tests substitute counting stubs for the real kernels).
//!
//! Method validation happens at construction time, in
//! [`Constant::simulator`], so an unsupported method name fails before any
//! simulation work begins.

use std::fmt;
use std::str::FromStr;

use crate::error::{McError, McResult};
use crate::rng::SimRng;

mod euler;
mod pi;

pub use euler::EulerSimulator;
pub use pi::PiSimulator;

/// One simulation run of `n_iterations` samples.
///
/// The returned sequence has length exactly `n_iterations`; element `i` is
/// the running average of the underlying random process after `i + 1`
/// samples. Implementations are deterministic in distribution only, not in
/// value, unless seeded explicitly.
pub trait Simulator {
    /// Human-readable name of the backing method.
    fn name(&self) -> &'static str;

    /// Run one simulation and return the running-average trajectory.
    ///
    /// # Errors
    ///
    /// Returns [`McError::Simulator`] if the backend fails. There is no
    /// retry; the caller aborts immediately.
    fn simulate(&mut self, n_iterations: usize) -> McResult<Vec<f64>>;
}

/// Sampling method for the pi approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiMethod {
    /// Area ratio: fraction of uniform points in the unit square that land
    /// inside the quarter unit circle; pi = 4 * inside / total.
    Area,
    /// Chord length: mean chord of the unit circle between uniform random
    /// endpoints has expectation 4/pi; pi = 4 / mean.
    Chord,
}

impl PiMethod {
    /// The method names accepted on the configuration surface.
    pub const NAMES: &'static [&'static str] = &["area", "chord"];

    /// Canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Chord => "chord",
        }
    }
}

impl fmt::Display for PiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PiMethod {
    type Err = McError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "area" => Ok(Self::Area),
            "chord" => Ok(Self::Chord),
            other => Err(McError::invalid_method("pi", other, Self::NAMES)),
        }
    }
}

/// A mathematical constant with a Monte Carlo approximation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// Euler's number, via the counting process E[draws until sum > 1] = e.
    Euler,
    /// Pi, via area-ratio or chord-length sampling.
    Pi,
}

impl Constant {
    /// Name used in plot titles.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Euler => "Euler's Number",
            Self::Pi => "\u{3c0}",
        }
    }

    /// Short name used in textual reports.
    #[must_use]
    pub const fn print_name(self) -> &'static str {
        match self {
            Self::Euler => "e",
            Self::Pi => "pi",
        }
    }

    /// The true value, drawn as the reference line.
    #[must_use]
    pub const fn true_value(self) -> f64 {
        match self {
            Self::Euler => std::f64::consts::E,
            Self::Pi => std::f64::consts::PI,
        }
    }

    /// Method variants this constant supports.
    #[must_use]
    pub const fn supported_methods(self) -> &'static [&'static str] {
        match self {
            Self::Euler => &[],
            Self::Pi => PiMethod::NAMES,
        }
    }

    /// Default y-axis bounds for the convergence plot.
    ///
    /// Early chord-method estimates swing much lower than area-method ones,
    /// so the chord plot opens the axis down to zero.
    #[must_use]
    pub fn default_bounds(self, method: Option<PiMethod>) -> (f64, f64) {
        match (self, method) {
            (Self::Euler, _) => (2.0, 3.8),
            (Self::Pi, Some(PiMethod::Chord)) => (0.0, 4.2),
            (Self::Pi, _) => (1.8, 4.2),
        }
    }

    /// Parse and validate a method name for this constant.
    ///
    /// # Errors
    ///
    /// Returns [`McError::InvalidMethod`] if the name is not one of the
    /// constant's supported variants, or if a method is supplied for a
    /// constant that has none.
    pub fn parse_method(self, method: Option<&str>) -> McResult<Option<PiMethod>> {
        match (self, method) {
            (_, None) => Ok(None),
            (Self::Pi, Some(name)) => PiMethod::from_str(name).map(Some),
            (Self::Euler, Some(name)) => Err(McError::invalid_method(
                self.print_name(),
                name,
                self.supported_methods(),
            )),
        }
    }

    /// Construct the native simulator for this constant.
    ///
    /// The method name is validated first, so an invalid method never
    /// reaches the simulation backend.
    ///
    /// # Errors
    ///
    /// Returns [`McError::InvalidMethod`] for an unsupported method name.
    pub fn simulator(self, method: Option<&str>, rng: SimRng) -> McResult<Box<dyn Simulator>> {
        let method = self.parse_method(method)?;
        Ok(match self {
            Self::Euler => Box::new(EulerSimulator::new(rng)),
            Self::Pi => Box::new(PiSimulator::new(method.unwrap_or(PiMethod::Area), rng)),
        })
    }

    /// Target description consumed by the batch runner.
    #[must_use]
    pub fn target(self) -> Target {
        self.target_with_method(None)
    }

    /// Target description with method-specific axis bounds.
    #[must_use]
    pub fn target_with_method(self, method: Option<PiMethod>) -> Target {
        Target {
            display_name: self.display_name().to_string(),
            print_name: self.print_name().to_string(),
            true_value: Some(self.true_value()),
            y_bounds: self.default_bounds(method),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.print_name())
    }
}

impl FromStr for Constant {
    type Err = McError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "e" | "euler" => Ok(Self::Euler),
            "pi" => Ok(Self::Pi),
            other => Err(McError::config(format!(
                "unknown constant '{other}': expected 'e' or 'pi'"
            ))),
        }
    }
}

/// What the batch runner is approximating and how to label it.
#[derive(Debug, Clone)]
pub struct Target {
    /// Name used in the plot title.
    pub display_name: String,
    /// Short name used in textual reports.
    pub print_name: String,
    /// True value for the reference overlay; no overlay when `None`.
    pub true_value: Option<f64>,
    /// Y-axis bounds of the convergence plot.
    pub y_bounds: (f64, f64),
}
