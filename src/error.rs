//! Error types for mcviz.
//!
//! All fallible operations return `Result<T, McError>` instead of panicking.
//! There are no retries anywhere: configuration and method errors are
//! detected before any simulation work begins, and simulator failures abort
//! the batch loop immediately without partial output being saved.

use thiserror::Error;

/// Result type alias for mcviz operations.
pub type McResult<T> = Result<T, McError>;

/// Unified error type for all mcviz operations.
#[derive(Debug, Error)]
pub enum McError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter. Fatal; checked before any
    /// simulation work begins.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Unsupported method name for a multi-variant constant. Fatal;
    /// checked before any simulation work begins.
    #[error("Invalid method '{method}' for {constant}: supported methods are {supported}")]
    InvalidMethod {
        /// Constant the method was requested for.
        constant: String,
        /// The rejected method name.
        method: String,
        /// Comma-separated list of accepted method names.
        supported: String,
    },

    // ===== Runtime Errors =====
    /// The simulation capability failed. Propagated immediately; aborts
    /// the batch loop.
    #[error("Simulator failure: {0}")]
    Simulator(String),

    /// Plot rendering failed.
    #[error("Plot error: {0}")]
    Plot(String),

    // ===== Ambient Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl McError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid-method error.
    #[must_use]
    pub fn invalid_method(
        constant: impl Into<String>,
        method: impl Into<String>,
        supported: &[&str],
    ) -> Self {
        Self::InvalidMethod {
            constant: constant.into(),
            method: method.into(),
            supported: if supported.is_empty() {
                "(none)".to_string()
            } else {
                supported.join(", ")
            },
        }
    }

    /// Create a simulator-failure error.
    #[must_use]
    pub fn simulator(message: impl Into<String>) -> Self {
        Self::Simulator(message.into())
    }

    /// Create a plot error.
    #[must_use]
    pub fn plot(message: impl Into<String>) -> Self {
        Self::Plot(message.into())
    }

    /// Check if this error was detectable before any simulation work.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::InvalidMethod { .. })
    }
}
