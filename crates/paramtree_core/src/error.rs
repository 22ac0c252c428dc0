//! Error types for the parameter model and its exporters.

use std::io;
use std::path::PathBuf;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Export result type
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors raised while building, checking or loading a tool description.
///
/// None of these are raised by the exporters themselves: conversion is total
/// over the data model and degrades by omitting fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A value violates its own restriction
    #[error("Validation failed for {field}: {reason}")]
    Validation {
        /// Offending field or node name
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// A tool description could not be decoded
    #[error("Parse error: {message}")]
    Parse {
        /// Decoder message
        message: String,
    },

    /// A tool description file could not be read
    #[error("Cannot read {path}: {message}")]
    Io {
        /// File that was being read
        path: String,
        /// Underlying I/O message
        message: String,
    },
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml_ng::Error> for CoreError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

/// Errors raised by the stream and file variants of the exporters.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The destination could not be opened for writing
    #[error("Cannot create output {}: {source}", path.display())]
    CannotCreateOutput {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing to an already opened destination failed
    #[error("Write failed: {source}")]
    Write {
        /// Underlying I/O error
        #[from]
        source: io::Error,
    },

    /// The YAML emitter rejected the generated document
    #[error("YAML emission failed: {message}")]
    Yaml {
        /// Emitter message
        message: String,
    },
}

impl From<serde_yaml_ng::Error> for ExportError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::Yaml {
            message: err.to_string(),
        }
    }
}
