//! Error type for the boundary of the crate.
//!
//! Building and searching never fail. Errors only arise where raw data enters:
//! coordinate validation, the binary record loader and raw-coordinate queries.

use thiserror::Error;

/// Errors raised while validating or loading vehicle positions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A latitude or longitude was NaN or infinite.
    #[error("non-finite coordinate: ({latitude}, {longitude})")]
    NonFiniteCoordinate {
        /// Offending latitude
        latitude: f64,
        /// Offending longitude
        longitude: f64,
    },

    /// The input ended in the middle of a record.
    #[error("record {index} is truncated")]
    TruncatedRecord {
        /// Zero-based position of the record in the stream
        index: usize,
    },

    /// The registration label was not valid UTF-8 or was not terminated.
    #[error("record {index} has an invalid registration label")]
    InvalidRegistration {
        /// Zero-based position of the record in the stream
        index: usize,
    },

    /// Underlying reader or writer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
