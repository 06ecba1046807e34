//! Error handling for Splicer
//!
//! Every fallible operation returns a typed [`SplicerError`]. Argument
//! validation errors are raised before any sample is read or written, so an
//! output file is never produced for a rejected request.

use thiserror::Error;

/// Result type alias for Splicer operations
pub type Result<T> = std::result::Result<T, SplicerError>;

/// Main error type for Splicer operations
#[derive(Error, Debug)]
pub enum SplicerError {
    // Argument Errors
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Unknown operation: {name} (expected insert, mix, remove or unmix)")]
    UnknownOperation { name: String },

    // Container Errors
    #[error("Failed to decode {path}: {reason}")]
    Decode {
        path: String,
        reason: String,
        #[source]
        source: Option<hound::Error>,
    },

    #[error("Failed to write audio file: {path}")]
    AudioWrite {
        path: String,
        #[source]
        source: hound::Error,
    },

    // Batch Errors
    #[error("Job {index} failed: {source}")]
    JobFailed {
        index: usize,
        #[source]
        source: Box<SplicerError>,
    },

    #[error("Failed to start batch workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SplicerError {
    /// Shorthand for an [`SplicerError::InvalidArgument`]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        SplicerError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SplicerError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            SplicerError::UnknownOperation { .. } => "UNKNOWN_OPERATION",
            SplicerError::Decode { .. } => "DECODE_ERROR",
            SplicerError::AudioWrite { .. } => "AUDIO_WRITE_ERROR",
            SplicerError::JobFailed { .. } => "JOB_FAILED",
            SplicerError::ThreadPool(_) => "THREAD_POOL_ERROR",
            SplicerError::Io(_) => "IO_ERROR",
            SplicerError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether the caller can fix the request and retry
    pub fn is_caller_error(&self) -> bool {
        match self {
            SplicerError::InvalidArgument { .. } | SplicerError::UnknownOperation { .. } => true,
            SplicerError::JobFailed { source, .. } => source.is_caller_error(),
            _ => false,
        }
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            SplicerError::InvalidArgument { .. } => {
                "Check that positions are non-negative and options match the operation"
            }
            SplicerError::UnknownOperation { .. } => "Use one of: insert, mix, remove, unmix",
            SplicerError::Decode { .. } => "Convert the input to mono 16-bit PCM WAV",
            SplicerError::AudioWrite { .. } | SplicerError::Io(_) => {
                "Check that the output directory exists and is writable"
            }
            SplicerError::Serialization(_) => "Check the job file is a JSON array of jobs",
            SplicerError::ThreadPool(_) => "Retry with fewer threads",
            SplicerError::JobFailed { source, .. } => source.recovery_hint(),
        }
    }
}
