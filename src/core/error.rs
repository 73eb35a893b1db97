// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for pc5codec.
//!
//! Provides error types for the decode and export pipeline:
//! - Argument validation (export formats, frame selectors)
//! - Sensor and data source lookup
//! - Array shape checks between calibration and frame data
//! - Container parsing and file I/O

use std::fmt;

/// Errors that can occur while decoding frames or exporting point clouds.
///
/// Empty frames are never reported through this type. They are a normal
/// outcome of the pipeline and surface as skipped frames instead.
#[derive(Debug, Clone)]
pub enum Pc5Error {
    /// Invalid argument value
    InvalidArgument {
        /// Argument name (e.g., "formats")
        argument: String,
        /// Why the value was rejected
        reason: String,
        /// Unrecognized tokens, sorted (empty unless a token list was rejected)
        unknown: Vec<String>,
        /// Accepted tokens, sorted
        valid: Vec<String>,
    },

    /// Sensor identifier has no configured record
    UnknownSensor {
        /// Requested sensor identifier
        sensor: String,
    },

    /// Required group or array is absent from the data source
    NotFound {
        /// What was looked up (e.g., "group 'ouster'")
        what: String,
        /// Where it was looked up (usually the data source path)
        location: String,
    },

    /// Explicit frame index outside `[0, num_frames - 1]`
    OutOfRange {
        /// Requested index
        index: i64,
        /// Number of frames in the sequence
        num_frames: usize,
    },

    /// Array dimensions disagree
    ShapeMismatch {
        /// What was being checked
        what: String,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Malformed data container
    Format {
        /// Container or component name
        context: String,
        /// Error message
        message: String,
    },

    /// Invalid sensor configuration
    Config {
        /// Error message
        message: String,
    },

    /// File system error
    Io {
        /// Operation or path
        context: String,
        /// Error message
        message: String,
    },
}

impl Pc5Error {
    /// Create an invalid argument error.
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Pc5Error::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
            unknown: Vec::new(),
            valid: Vec::new(),
        }
    }

    /// Create an invalid `formats` argument naming the unrecognized tokens.
    ///
    /// Token lists are sorted for stable messages.
    pub fn unknown_format(mut unknown: Vec<String>, mut valid: Vec<String>) -> Self {
        unknown.sort();
        unknown.dedup();
        valid.sort();
        Pc5Error::InvalidArgument {
            argument: "formats".to_string(),
            reason: format!(
                "Unknown format(s): {}. Valid: {}",
                unknown.join(", "),
                valid.join(", ")
            ),
            unknown,
            valid,
        }
    }

    /// Create an unknown sensor error.
    pub fn unknown_sensor(sensor: impl Into<String>) -> Self {
        Pc5Error::UnknownSensor {
            sensor: sensor.into(),
        }
    }

    /// Create a "not found" error.
    pub fn not_found(what: impl Into<String>, location: impl Into<String>) -> Self {
        Pc5Error::NotFound {
            what: what.into(),
            location: location.into(),
        }
    }

    /// Create an out of range error.
    pub fn out_of_range(index: i64, num_frames: usize) -> Self {
        Pc5Error::OutOfRange { index, num_frames }
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        Pc5Error::ShapeMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }

    /// Create a container format error.
    pub fn format(context: impl Into<String>, message: impl Into<String>) -> Self {
        Pc5Error::Format {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Pc5Error::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, err: impl fmt::Display) -> Self {
        Pc5Error::Io {
            context: context.into(),
            message: err.to_string(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Pc5Error::InvalidArgument {
                argument,
                reason,
                unknown,
                valid,
            } => {
                let mut fields = vec![("argument", argument.clone()), ("reason", reason.clone())];
                if !unknown.is_empty() {
                    fields.push(("unknown", unknown.join(",")));
                    fields.push(("valid", valid.join(",")));
                }
                fields
            }
            Pc5Error::UnknownSensor { sensor } => vec![("sensor", sensor.clone())],
            Pc5Error::NotFound { what, location } => {
                vec![("what", what.clone()), ("location", location.clone())]
            }
            Pc5Error::OutOfRange { index, num_frames } => vec![
                ("index", index.to_string()),
                ("num_frames", num_frames.to_string()),
            ],
            Pc5Error::ShapeMismatch {
                what,
                expected,
                actual,
            } => vec![
                ("what", what.clone()),
                ("expected", expected.to_string()),
                ("actual", actual.to_string()),
            ],
            Pc5Error::Format { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            Pc5Error::Config { message } => vec![("message", message.clone())],
            Pc5Error::Io { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
        }
    }
}

impl fmt::Display for Pc5Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pc5Error::InvalidArgument {
                reason, unknown, ..
            } if !unknown.is_empty() => f.write_str(reason),
            Pc5Error::InvalidArgument {
                argument, reason, ..
            } => write!(f, "Invalid argument '{argument}': {reason}"),
            Pc5Error::UnknownSensor { sensor } => write!(f, "Unknown sensor: '{sensor}'"),
            Pc5Error::NotFound { what, location } => {
                write!(f, "{what} not found in {location}")
            }
            Pc5Error::OutOfRange { index, num_frames } => write!(
                f,
                "frame {index} out of range [0, {}]",
                *num_frames as i64 - 1
            ),
            Pc5Error::ShapeMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "Shape mismatch for {what}: expected {expected}, got {actual}"
            ),
            Pc5Error::Format { context, message } => {
                write!(f, "{context} format error: {message}")
            }
            Pc5Error::Config { message } => write!(f, "Sensor configuration error: {message}"),
            Pc5Error::Io { context, message } => write!(f, "I/O error ({context}): {message}"),
        }
    }
}

impl std::error::Error for Pc5Error {}

impl From<std::io::Error> for Pc5Error {
    fn from(err: std::io::Error) -> Self {
        Pc5Error::Io {
            context: "IO".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for pc5codec operations.
pub type Result<T> = std::result::Result<T, Pc5Error>;
