//! Error types for the join and encode entry points.
//!
//! All failures are synchronous and surfaced to the caller immediately.
//! A failed call never returns a partial result set.

use thiserror::Error;

/// Errors that can occur when running a similarity join.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JoinError {
    /// The similarity threshold is outside the valid `[0, 1]` range
    /// (NaN is rejected as well).
    #[error("Invalid similarity threshold {value}: must be within [0, 1]")]
    InvalidThreshold {
        /// The threshold the caller supplied
        value: f64,
    },

    /// An encoded record's bit-vector length does not match the
    /// `vector_length` the join was called with. This is a caller
    /// configuration error; silently truncating would corrupt results.
    #[error(
        "Bit-vector length mismatch for record {record} of dataset {dataset}: \
         expected {expected} bits, got {actual}"
    )]
    VectorLengthMismatch {
        /// Expected bit-vector length
        expected: usize,
        /// Actual length of the offending record
        actual: usize,
        /// Index of the dataset containing the record
        dataset: usize,
        /// Index of the record within its dataset
        record: usize,
    },
}

/// Errors that can occur when encoding a record into a bit-vector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The requested bit-vector length is zero; no bit position can
    /// be derived modulo zero.
    #[error("Bit-vector length must be at least 1")]
    ZeroVectorLength,

    /// The requested number of hash functions is zero; every element
    /// would be dropped from the encoding.
    #[error("Hash count k must be at least 1")]
    ZeroHashCount,
}
