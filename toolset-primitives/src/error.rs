//! Shared error definitions for toolset primitives.

use thiserror::Error;

/// Result alias used throughout the toolset primitives.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing toolset primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// Logical schema name failed validation.
    #[error("invalid schema name `{name}`: {reason}")]
    InvalidSchemaName {
        /// The offending name string.
        name: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Class key failed validation.
    #[error("invalid class key `{key}`: {reason}")]
    InvalidClassKey {
        /// The offending key string.
        key: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Field descriptor failed validation.
    #[error("invalid field descriptor: {reason}")]
    InvalidField {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Header descriptor failed validation.
    #[error("invalid header descriptor: {reason}")]
    InvalidHeader {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Toolkit identity failed validation.
    #[error("invalid toolkit: {reason}")]
    InvalidToolkit {
        /// Human-readable reason for rejection.
        reason: String,
    },
}
