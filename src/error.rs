//! Error types for sortbench
//!
//! Only `Config`, `Io` and `State` are fatal to a pipeline run. The remaining
//! kinds are raised at a single measurement iteration, sweep cell or CSV row
//! and are logged and skipped by their caller.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, BenchError>;

/// sortbench error types
#[derive(Error, Debug)]
pub enum BenchError {
    /// A sort routine rejected its input
    #[error("Invalid input for {algorithm}: {reason}")]
    InvalidInput { algorithm: String, reason: String },

    /// Post-sort order validation failed for one iteration
    #[error("{algorithm} produced unsorted output in iteration {iteration}")]
    Corruption { algorithm: String, iteration: usize },

    /// No measurement iteration survived validation
    #[error("No valid measurements collected for {algorithm} on {shape} ({size} elements)")]
    MeasurementExhaustion {
        algorithm: String,
        shape: String,
        size: usize,
    },

    /// Unknown data shape or a generator that produced the wrong length
    #[error("Dataset generation failed: {0}")]
    Generation(String),

    /// Malformed row in a persisted sample file
    #[error("Failed to parse line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Illegal pipeline state transition
    #[error("Illegal pipeline transition: {from:?} -> {to:?}")]
    State {
        from: crate::pipeline::PipelineState,
        to: crate::pipeline::PipelineState,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON report serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
