//! Error handling module for TrimSafe

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for TrimSafe operations
#[derive(Error, Debug)]
pub enum TrimSafeError {
    /// Start/end pair outside `0 <= start < end`
    #[error("Invalid time range: start ({start:.3}s) must be >= 0 and less than end ({end:.3}s)")]
    InvalidRange { start: f64, end: f64 },

    /// Invalid time format
    #[error("Invalid time format: {time}. Expected HH:MM:SS.ms, MM:SS.ms, or seconds")]
    InvalidTime { time: String },

    /// Unknown trim mode name
    #[error("Invalid trim mode: {mode}. Valid modes: copy, reencode, smart")]
    InvalidMode { mode: String },

    /// Input file not found or inaccessible
    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// Input extension outside the supported container list
    #[error("Unsupported file extension: {} (supported: .mp4 .mov .mkv .webm .avi .m4v)", path.display())]
    UnsupportedExtension { path: PathBuf },

    /// Output directory missing or not writable
    #[error("Destination directory is not writable: {}", dir.display())]
    DestinationNotWritable { dir: PathBuf },

    /// Output would overwrite the input while it is being read
    #[error("Output path is the input file: {}; use overwrite for in-place trims", path.display())]
    OutputIsInput { path: PathBuf },

    /// External tool could not be located
    #[error("{tool} not found (looked for '{binary}')")]
    ToolNotFound { tool: &'static str, binary: String },

    /// External tool located but could not be started
    #[error("Failed to launch {tool}: {source}")]
    ToolSpawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Probe tool failed or produced unusable output
    #[error("Failed to probe media file {}: {message}", path.display())]
    ProbeFailed { path: PathBuf, message: String },

    /// Operation terminated by the caller
    #[error("Operation cancelled")]
    Cancelled,

    /// Rename sequence failed, the original is back at its path
    #[error("Overwrite of {} failed and was rolled back; the original file is unchanged: {message}", input.display())]
    OverwriteAborted { input: PathBuf, message: String },

    /// Rename sequence failed and the rollback failed too
    #[error(
        "Overwrite of {} failed and could not be rolled back: {message}. \
         Manual inspection required: the original media is at {}",
        input.display(),
        backup.display()
    )]
    OverwriteInconsistent {
        input: PathBuf,
        backup: PathBuf,
        message: String,
    },

    /// Configuration load/validation error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error classes callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input detected before any subprocess launch
    Validation,
    /// Tool binary missing or not executable
    ToolInvocation,
    /// Tool ran but its output could not be used
    Execution,
    /// Overwrite rename sequence failed
    OverwriteConsistency,
    /// Caller-initiated termination
    Cancelled,
    /// Configuration problem
    Config,
    /// Any other I/O failure
    Io,
}

impl TrimSafeError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRange { .. }
            | Self::InvalidTime { .. }
            | Self::InvalidMode { .. }
            | Self::InputNotFound { .. }
            | Self::UnsupportedExtension { .. }
            | Self::DestinationNotWritable { .. }
            | Self::OutputIsInput { .. } => ErrorKind::Validation,
            Self::ToolNotFound { .. } | Self::ToolSpawn { .. } => ErrorKind::ToolInvocation,
            Self::ProbeFailed { .. } => ErrorKind::Execution,
            Self::OverwriteAborted { .. } | Self::OverwriteInconsistent { .. } => {
                ErrorKind::OverwriteConsistency
            }
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Config { .. } => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Whether the filesystem may be left in a state needing manual repair
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::OverwriteInconsistent { .. })
    }

    /// Create a probe failure error
    pub fn probe_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ProbeFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias for TrimSafe operations
pub type TrimSafeResult<T> = std::result::Result<T, TrimSafeError>;
