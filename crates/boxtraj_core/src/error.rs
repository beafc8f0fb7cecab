//! Error types shared by every boxtraj crate.

use thiserror::Error;

/// Unified error type for trajectory generation, storage and playback.
#[derive(Error, Debug)]
pub enum TrajectoryError {
    /// A run parameter is out of its valid domain
    #[error("Configuration error: {0}")]
    Config(String),

    /// The text stream does not follow the trajectory layout.
    /// `line` is 1-based.
    #[error("Format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// A step index outside `[0, len)`
    #[error("Step index {index} out of range (step count {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A recorded snapshot has the wrong number of particles
    #[error("Expected {expected} particle entries, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// Finalizing a trajectory before every step was recorded
    #[error("Trajectory incomplete: step {step} was never recorded")]
    Incomplete { step: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary checkpoint encode/decode failure
    #[error("Checkpoint error: {0}")]
    Checkpoint(String),
}

impl TrajectoryError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        TrajectoryError::Config(message.into())
    }

    /// Creates a format error for a 1-based line number.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        TrajectoryError::Format {
            line,
            message: message.into(),
        }
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        TrajectoryError::IndexOutOfRange { index, len }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, TrajectoryError::Format { .. })
    }
}

pub type Result<T> = std::result::Result<T, TrajectoryError>;
