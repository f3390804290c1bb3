//! Result pair types for confirmed matches.
//!
//! A join result identifies records by their position in the caller's
//! input, never by internal ids: `RecordId` names a `(dataset, record)`
//! location and `ResultPair` holds two of them in canonical order.

use serde::{Deserialize, Serialize};

/// Identity of one record in the caller's input.
///
/// An explicit two-field struct rather than a positional tuple so that
/// dataset and record indices cannot be swapped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId {
    /// Index of the dataset in the caller-supplied list
    pub dataset: usize,
    /// Index of the record within its dataset
    pub record: usize,
}

impl RecordId {
    /// Create a new record identity.
    #[must_use]
    pub fn new(dataset: usize, record: usize) -> Self {
        Self { dataset, record }
    }
}

/// A confirmed match between two records.
///
/// Invariants:
/// - `first <= second` lexicographically by `(dataset, record)`
/// - never pairs a record with itself
/// - in multi-dataset mode, `first` and `second` come from different datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResultPair {
    /// The lexicographically smaller record identity
    pub first: RecordId,
    /// The lexicographically larger record identity
    pub second: RecordId,
}

impl ResultPair {
    /// Create a pair, normalizing the two identities into canonical order.
    #[must_use]
    pub fn new(a: RecordId, b: RecordId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Check whether both records come from the same dataset.
    #[must_use]
    pub fn is_within_dataset(&self) -> bool {
        self.first.dataset == self.second.dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_normalizes_order() {
        let a = RecordId::new(1, 0);
        let b = RecordId::new(0, 3);
        let pair = ResultPair::new(a, b);
        assert_eq!(pair.first, b);
        assert_eq!(pair.second, a);
    }

    #[test]
    fn test_pair_orders_by_record_within_dataset() {
        let a = RecordId::new(0, 5);
        let b = RecordId::new(0, 2);
        let pair = ResultPair::new(a, b);
        assert_eq!(pair.first.record, 2);
        assert_eq!(pair.second.record, 5);
        assert!(pair.is_within_dataset());
    }
}
