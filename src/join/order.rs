//! Global element ordering by ascending document frequency.
//!
//! Rarer elements are stronger discriminators, so they come first in every
//! record's prefix. That is what keeps the prefix filter tight: probing a
//! record's rarest elements first yields short postings lists and few false
//! candidates.

use std::collections::HashMap;

use super::Element;

/// A total order over all distinct elements of one corpus.
///
/// Rank is monotonic in ascending document frequency; equal-frequency
/// elements break ties by their natural ordering. The tie-break must be
/// deterministic because downstream filters compare ranks, not frequencies.
#[derive(Debug, Clone)]
pub(crate) struct GlobalOrder<E> {
    ranks: HashMap<E, u32>,
}

impl<E: Element> GlobalOrder<E> {
    /// Build the order from a corpus of records with unique elements.
    ///
    /// Document frequency counts the number of records containing the
    /// element; records are element sets, so one pass over each record
    /// counts every element at most once per record.
    pub(crate) fn build(corpus: &[Vec<E>]) -> Self {
        let mut frequency: HashMap<&E, usize> = HashMap::new();
        for record in corpus {
            for element in record {
                *frequency.entry(element).or_insert(0) += 1;
            }
        }

        let mut by_frequency: Vec<(usize, &E)> =
            frequency.into_iter().map(|(e, n)| (n, e)).collect();
        by_frequency.sort_unstable();

        let ranks = by_frequency
            .into_iter()
            .enumerate()
            .map(|(rank, (_, element))| (element.clone(), rank as u32))
            .collect();

        Self { ranks }
    }

    /// Rank of an element, if it occurred in the corpus the order was
    /// built from.
    pub(crate) fn rank(&self, element: &E) -> Option<u32> {
        self.ranks.get(element).copied()
    }

    /// Number of distinct elements in the order.
    pub(crate) fn len(&self) -> usize {
        self.ranks.len()
    }
}
