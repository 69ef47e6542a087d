//! # Error Handling
//!
//! This module defines the centralized error type for the `modulemd` crate.
//! It uses the `thiserror` library to describe every failure the codec can
//! report, grouped into three kinds that callers can branch on:
//!
//! - **Open**: a file sink or source could not be created or read.
//! - **Parse**: the input is malformed YAML or does not match the modulemd
//!   schema (wrong document tag, unsupported version, missing mandatory field).
//! - **Emit**: a document failed validation before output, or the output
//!   stream itself failed.
//!
//! Any error aborts the whole batch; no partial result is ever returned.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The sink or source could not be opened.
    Open,
    /// The input could not be parsed into module documents.
    Parse,
    /// The documents could not be emitted.
    Emit,
}

/// Main error type for modulemd operations
#[derive(Error, Debug)]
pub enum Error {
    /// A file could not be opened for reading or writing.
    #[error("Failed to open file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input did not describe valid module documents.
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// A mandatory field was absent when the document was emitted.
    #[error("Missing required option {field}")]
    Validation { field: String },

    /// The output event stream rejected an event.
    #[error("Emit error: {message}")]
    Emit { message: String },

    /// The output sink failed while being written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A YAML syntax error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Returns the category this error belongs to.
    ///
    /// Validation failures are a subkind of [`ErrorKind::Emit`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Open { .. } => ErrorKind::Open,
            Error::Parse { .. } | Error::Yaml(_) => ErrorKind::Parse,
            Error::Validation { .. } | Error::Emit { .. } | Error::Io(_) => ErrorKind::Emit,
        }
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    pub(crate) fn emit(message: impl Into<String>) -> Self {
        Error::Emit {
            message: message.into(),
        }
    }

    pub(crate) fn validation(field: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
