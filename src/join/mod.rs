//! Similarity join module.
//!
//! This module provides the join pipeline:
//! - Global element ordering by document frequency (Phase 1)
//! - Record preprocessing into rank vectors (Phase 2)
//! - Filter-driven candidate generation (Phase 3)
//! - Exact Jaccard verification (Phase 4)
//! - Multi-dataset orchestration and identity remapping

mod candidates;
mod order;
mod preprocess;
mod verify;

pub mod joiner;
pub mod pairs;

pub use joiner::{join, join_encoded, JoinConfig, JoinSummary, Joiner};
pub use pairs::{RecordId, ResultPair};

use std::hash::Hash;

/// Bound for record elements: anything comparable, hashable and cloneable.
///
/// The token variant instantiates this with `String`; the encoded variant
/// uses `u32` set-bit positions. The natural `Ord` of the element breaks
/// frequency ties in the global order, so it must be deterministic.
pub trait Element: Ord + Hash + Eq + Clone {}

impl<T: Ord + Hash + Eq + Clone> Element for T {}
