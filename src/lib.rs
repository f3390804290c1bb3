//! simjoin - Threshold-Driven Set-Similarity Join
//!
//! Finds, across one or more collections of records, all pairs whose Jaccard
//! similarity meets or exceeds a threshold without evaluating every possible
//! pair (the PPJoin family of prefix-filter algorithms).
//!
//! Records are either explicit sets of comparable elements (tokens) or
//! fixed-length bit-vectors produced by a keyed hash encoding, the
//! privacy-preserving P4Join variant.
//!
//! # Example
//!
//! ```
//! use simjoin::tokenize::whitespace_tokens;
//!
//! let ds0: Vec<_> = ["a b d", "a b c", "h k"].iter().map(|s| whitespace_tokens(s)).collect();
//! let ds1: Vec<_> = ["a b k", "a b", "h k", "a c h"].iter().map(|s| whitespace_tokens(s)).collect();
//!
//! let pairs = simjoin::join(&[ds0, ds1], 0.5).unwrap();
//! for pair in &pairs {
//!     println!(
//!         "record {} of dataset {} matches record {} of dataset {}",
//!         pair.first.record, pair.first.dataset, pair.second.record, pair.second.dataset
//!     );
//! }
//! ```

pub mod encode;
pub mod error;
pub mod join;
pub mod tokenize;

pub use encode::{encode, BitVector};
pub use error::{EncodeError, JoinError};
pub use join::{
    join, join_encoded, Element, JoinConfig, JoinSummary, Joiner, RecordId, ResultPair,
};
