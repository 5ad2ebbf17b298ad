//! Error handling for the soilsense workspace
//!
//! A single error type shared by the loading, processing and dataset
//! crates. Every failure is fatal to the call that produced it.

use core::fmt;

/// Result type alias for soilsense operations
pub type SoilResult<T> = Result<T, SoilError>;

/// Error type for all soilsense operations
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SoilError {
    /// Signal data violates a structural requirement
    InvalidSignalData {
        /// Description of the data problem
        reason: String,
    },

    /// Configuration value out of range
    InvalidConfig {
        /// Description of the configuration error
        reason: String,
    },

    /// No window means were available to estimate a baseline from
    EmptyBaseline {
        /// Number of samples in the recording
        samples: usize,
    },

    /// File name did not contain a known activity token
    UnknownActivity {
        /// Offending file name
        name: String,
    },

    /// Directory name did not contain a known area token
    UnknownArea {
        /// Offending directory name
        name: String,
    },

    /// Transform mode string is not one of the supported modes
    UnknownMode {
        /// Requested mode
        mode: String,
    },

    /// Annotation line is not an integer
    AnnotationParse {
        /// Annotation file path
        path: String,
        /// 1-based line number
        line: usize,
        /// Raw line content
        content: String,
    },

    /// Filesystem failure
    Io {
        /// Path being accessed
        path: String,
        /// Underlying error description
        reason: String,
    },

    /// Signal table could not be parsed
    Format {
        /// Description of format issue
        reason: String,
    },

    /// Two sequences that must be equally long are not
    LengthMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Serialization/deserialization error
    Serialization {
        /// Serialization error description
        reason: String,
    },
}

impl fmt::Display for SoilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoilError::InvalidSignalData { reason } => {
                write!(f, "Invalid signal data: {}", reason)
            }
            SoilError::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }
            SoilError::EmptyBaseline { samples } => {
                write!(f, "Cannot estimate baseline: no window means from {} samples",
                       samples)
            }
            SoilError::UnknownActivity { name } => {
                write!(f, "Unrecognized activity: {}", name)
            }
            SoilError::UnknownArea { name } => {
                write!(f, "Unrecognized area: {}", name)
            }
            SoilError::UnknownMode { mode } => {
                write!(f, "Unrecognized mode: {}", mode)
            }
            SoilError::AnnotationParse { path, line, content } => {
                write!(f, "Malformed annotation in {} at line {}: {:?}",
                       path, line, content)
            }
            SoilError::Io { path, reason } => {
                write!(f, "I/O error on {}: {}", path, reason)
            }
            SoilError::Format { reason } => {
                write!(f, "Format error: {}", reason)
            }
            SoilError::LengthMismatch { expected, actual } => {
                write!(f, "Length mismatch: expected {}, got {}", expected, actual)
            }
            SoilError::Serialization { reason } => {
                write!(f, "Serialization error: {}", reason)
            }
        }
    }
}

impl std::error::Error for SoilError {}

impl SoilError {
    /// Wrap an I/O error together with the path that caused it
    pub fn io(path: impl AsRef<std::path::Path>, error: std::io::Error) -> Self {
        SoilError::Io {
            path: path.as_ref().display().to_string(),
            reason: error.to_string(),
        }
    }
}

/// Convenience macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)+) => {
        $crate::error::SoilError::InvalidConfig {
            reason: format!($($arg)+),
        }
    };
}
