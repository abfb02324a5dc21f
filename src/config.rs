//! Configuration with YAML schema and validation.
//!
//! Mistakes are caught before any simulation work:
//! - Type-safe configuration structs
//! - Schema validation via serde (unknown fields rejected)
//! - Runtime semantic validation (divisibility, method names)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::{McError, McResult};
use crate::runner::RunOptions;
use crate::simulate::Constant;

/// Top-level visualization configuration.
///
/// Loaded from YAML files with full schema validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Constant to approximate: `e` or `pi`.
    #[validate(length(min = 1))]
    pub constant: String,

    /// Sampling method, for constants that support more than one.
    #[serde(default)]
    pub method: Option<String>,

    /// Simulation sizing.
    #[validate(nested)]
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Figure output settings.
    #[validate(nested)]
    #[serde(default)]
    pub output: OutputConfig,

    /// Print the overall estimate when done.
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

const fn default_verbose() -> bool {
    true
}

/// Simulation sizing parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Samples per run.
    #[validate(range(min = 1))]
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Total number of runs.
    #[validate(range(min = 1))]
    #[serde(default = "default_runs")]
    pub runs: usize,

    /// Runs held in memory at once; must evenly divide `runs`.
    #[validate(range(min = 1))]
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Master seed for the random source.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_iterations() -> usize {
    1_000_000
}

const fn default_runs() -> usize {
    200
}

const fn default_batch_size() -> usize {
    10
}

const fn default_seed() -> u64 {
    42
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            runs: default_runs(),
            batch_size: default_batch_size(),
            seed: default_seed(),
        }
    }
}

/// Figure output settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Persist the figure to `path`.
    #[serde(default = "default_save")]
    pub save: bool,

    /// Present the figure interactively.
    #[serde(default)]
    pub show: bool,

    /// Output file; defaults to `<constant>.png`.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Output resolution in dots per inch.
    #[validate(range(min = 10, max = 2400))]
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

const fn default_save() -> bool {
    true
}

const fn default_dpi() -> u32 {
    300
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save: default_save(),
            show: false,
            path: None,
            dpi: default_dpi(),
        }
    }
}

impl VizConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> McResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> McResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        config.validate()?;
        config.validate_semantic()?;

        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VizConfigBuilder {
        VizConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    ///
    /// # Errors
    ///
    /// Returns [`McError::Config`] for an unknown constant or a batch size
    /// that does not evenly divide the run count, and
    /// [`McError::InvalidMethod`] for an unsupported method name.
    pub fn validate_semantic(&self) -> McResult<()> {
        let constant = self.parse_constant()?;
        constant.parse_method(self.method.as_deref())?;

        if self.simulation.runs % self.simulation.batch_size != 0 {
            return Err(McError::config(format!(
                "batch_size {} must evenly divide runs {}",
                self.simulation.batch_size, self.simulation.runs
            )));
        }

        Ok(())
    }

    /// The configured constant.
    ///
    /// # Errors
    ///
    /// Returns [`McError::Config`] if the name is not `e` or `pi`.
    pub fn parse_constant(&self) -> McResult<Constant> {
        self.constant.parse()
    }

    /// Translate into batch-runner options.
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        let mut builder = RunOptions::builder()
            .n_iterations(self.simulation.iterations)
            .n_runs(self.simulation.runs)
            .batch_size(self.simulation.batch_size)
            .verbose(self.verbose)
            .save(self.output.save)
            .show(self.output.show)
            .dpi(self.output.dpi);
        if let Some(path) = &self.output.path {
            builder = builder.output_path(path.clone());
        }
        builder.build()
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VizConfigBuilder {
    constant: Option<String>,
    method: Option<String>,
    simulation: SimulationConfig,
    output: OutputConfig,
    verbose: Option<bool>,
}

impl VizConfigBuilder {
    /// Set the constant to approximate.
    #[must_use]
    pub fn constant(mut self, constant: impl Into<String>) -> Self {
        self.constant = Some(constant.into());
        self
    }

    /// Set the sampling method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set samples per run.
    #[must_use]
    pub const fn iterations(mut self, iterations: usize) -> Self {
        self.simulation.iterations = iterations;
        self
    }

    /// Set the total run count.
    #[must_use]
    pub const fn runs(mut self, runs: usize) -> Self {
        self.simulation.runs = runs;
        self
    }

    /// Set the batch size.
    #[must_use]
    pub const fn batch_size(mut self, batch_size: usize) -> Self {
        self.simulation.batch_size = batch_size;
        self
    }

    /// Set the master seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.simulation.seed = seed;
        self
    }

    /// Enable or disable saving.
    #[must_use]
    pub const fn save(mut self, save: bool) -> Self {
        self.output.save = save;
        self
    }

    /// Enable or disable interactive display.
    #[must_use]
    pub const fn show(mut self, show: bool) -> Self {
        self.output.show = show;
        self
    }

    /// Set the output path.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.path = Some(path.into());
        self
    }

    /// Set the output resolution.
    #[must_use]
    pub const fn dpi(mut self, dpi: u32) -> Self {
        self.output.dpi = dpi;
        self
    }

    /// Enable or disable the textual report.
    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`McError::Config`] if no constant was set, or any schema or
    /// semantic validation error.
    pub fn build(self) -> McResult<VizConfig> {
        let constant = self
            .constant
            .ok_or_else(|| McError::config("constant is required"))?;
        let config = VizConfig {
            schema_version: default_schema_version(),
            constant,
            method: self.method,
            simulation: self.simulation,
            output: self.output,
            verbose: self.verbose.unwrap_or_else(default_verbose),
        };
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }
}
