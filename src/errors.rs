/*!
 * Error types for the srtconv application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when a cue violates the model invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CueError {
    /// The cue ends before it starts
    #[error("cue ends at {end_ms} ms before it starts at {start_ms} ms")]
    EndBeforeStart {
        start_ms: u64,
        end_ms: u64,
    },
}

/// Errors that can occur while reading SRT input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// A block does not follow the SRT grammar
    #[error("malformed subtitle block {block}: {reason}")]
    MalformedBlock {
        /// 1-based position of the block in the input
        block: usize,
        reason: String,
    },

    /// A block parsed but describes an impossible cue
    #[error("invalid cue in subtitle block {block}: {source}")]
    InvalidCue {
        block: usize,
        #[source]
        source: CueError,
    },
}

impl SubtitleError {
    /// Block number the error refers to
    pub fn block(&self) -> usize {
        match self {
            Self::MalformedBlock { block, .. } | Self::InvalidCue { block, .. } => *block,
        }
    }
}

/// An encoder could not render a track
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to encode {format}: {message}")]
pub struct EncodingError {
    /// Format tag, e.g. "VTT"
    pub format: &'static str,
    pub message: String,
}

impl EncodingError {
    pub fn new(format: &'static str, message: impl Into<String>) -> Self {
        EncodingError {
            format,
            message: message.into(),
        }
    }
}

/// An encoded document could not be written
#[derive(Error, Debug)]
#[error("failed to write {}: {source}", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Failure of a single output format, either while encoding or writing
#[derive(Error, Debug)]
pub enum FormatError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The input file is missing
    #[error("Input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle parsing
    #[error("Error reading SRT file: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
