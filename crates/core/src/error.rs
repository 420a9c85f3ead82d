//! Error types for the value kernel
//!
//! Kernel-level failures are reported synchronously to the immediate caller.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Domain-level outcomes of a computation are NOT errors here; they travel
//! across the engine boundary as [`crate::UdfResult`].

use crate::kind::ValueKind;
use std::io;
use thiserror::Error;

/// Result type alias for kernel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for value operations
#[derive(Debug, Error)]
pub enum Error {
    /// The installed backend does not provide this operation
    #[error("Unsupported operation: {op} on {kind} backend '{backend}'")]
    Unsupported {
        /// Kind of the value the operation was invoked on
        kind: ValueKind,
        /// Backend name as reported by the backend
        backend: &'static str,
        /// Operation name
        op: &'static str,
    },

    /// Positional access outside `0..size`
    #[error("Index out of range: {index} (size {size})")]
    IndexOutOfRange {
        /// Requested index
        index: i64,
        /// Size of the container at the time of access
        size: usize,
    },

    /// Bin name rejected by the record or its backend
    #[error("Invalid bin name '{name}': {reason}")]
    InvalidBinName {
        /// The rejected name
        name: String,
        /// Reason why it's invalid
        reason: String,
    },

    /// Backing store cannot grow to satisfy the operation
    #[error("Capacity exceeded for {resource}: limit {limit}, requested {requested}")]
    CapacityExceeded {
        /// What ran out (e.g. "list elements")
        resource: String,
        /// Configured limit
        limit: usize,
        /// Size the operation would have produced
        requested: usize,
    },

    /// Backend-specific failure
    #[error("Backend error: {0}")]
    Backend(String),

    /// Configuration could not be parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while reading or writing configuration
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Shorthand for an unsupported-operation error
    pub fn unsupported(kind: ValueKind, backend: &'static str, op: &'static str) -> Self {
        Error::Unsupported { kind, backend, op }
    }

    /// Check if the operation is not provided by the backend
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported { .. })
    }

    /// Check if this error is an out-of-range access
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::IndexOutOfRange { .. })
    }

    /// Check if this error is a backing-store capacity failure
    pub fn is_capacity(&self) -> bool {
        matches!(self, Error::CapacityExceeded { .. })
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}
