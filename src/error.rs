//! Error types for listener-lens

use thiserror::Error;

/// Result type alias for listener-lens operations
pub type Result<T> = std::result::Result<T, LensError>;

/// Error types for the surface around the rendering pipeline.
///
/// The pipeline itself (rule parsing, reformatting, highlighting) never fails;
/// these cover file handling, decoding and configuration.
#[derive(Error, Debug)]
pub enum LensError {
    /// File could not be opened or read
    #[error("Cannot open file '{path}': {reason}")]
    FileNotFound { path: String, reason: String },

    /// Listener records could not be decoded
    #[error("Invalid listener records in '{path}': {reason}")]
    InvalidRecords { path: String, reason: String },

    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Conflicting output format options
    #[error("Output format conflict: specify only one of --json or --html")]
    OutputFormatConflict,

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted rule set error
    #[error("Rules error: {0}")]
    RulesError(String),

    /// Persisted rule set version mismatch
    #[error("Rule set version {found} is not supported (expected {expected})")]
    RulesVersionMismatch { found: u32, expected: u32 },

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}
