//! Record preprocessing: rank encoding and the cardinality sort.
//!
//! Every downstream filter depends on records being scanned in ascending
//! cardinality order (shorter records are indexed before longer ones, which
//! is what makes the length filter sound), yet the public result must
//! reference original identities. The sort therefore produces a new ordered
//! view plus a permutation back to the untouched corpus; caller data is
//! never mutated.

use super::order::GlobalOrder;
use super::Element;

/// The corpus after preprocessing: rank vectors in ascending-cardinality
/// order, plus the permutation back to original global ids.
#[derive(Debug)]
pub(crate) struct PreparedCorpus {
    /// Records as sorted rank vectors, ordered by ascending cardinality
    /// (stable: equal cardinalities keep their relative input order).
    pub records: Vec<Vec<u32>>,
    /// `original_order[i]` is the global id that sorted index `i` had in
    /// the untouched corpus.
    pub original_order: Vec<usize>,
}

/// Rank-encode every record and stable-sort by cardinality.
pub(crate) fn preprocess<E: Element>(corpus: &[Vec<E>], order: &GlobalOrder<E>) -> PreparedCorpus {
    let mut indexed: Vec<(usize, Vec<u32>)> = corpus
        .iter()
        .enumerate()
        .map(|(global_id, record)| {
            // Every element of the corpus the order was built from resolves
            // to a rank.
            let mut ranks: Vec<u32> = record
                .iter()
                .filter_map(|element| order.rank(element))
                .collect();
            ranks.sort_unstable();
            (global_id, ranks)
        })
        .collect();

    // Vec::sort_by_key is stable; ties keep input order.
    indexed.sort_by_key(|(_, ranks)| ranks.len());

    let mut original_order = Vec::with_capacity(indexed.len());
    let mut records = Vec::with_capacity(indexed.len());
    for (global_id, ranks) in indexed {
        original_order.push(global_id);
        records.push(ranks);
    }

    PreparedCorpus {
        records,
        original_order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(records: &[&[&str]]) -> Vec<Vec<String>> {
        records
            .iter()
            .map(|r| r.iter().map(|s| (*s).to_string()).collect())
            .collect()
    }

    #[test]
    fn test_sorts_by_cardinality_with_permutation() {
        let corpus = corpus(&[&["a", "b", "c"], &["a"], &["a", "b"]]);
        let order = GlobalOrder::build(&corpus);
        let prepared = preprocess(&corpus, &order);

        let lengths: Vec<usize> = prepared.records.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![1, 2, 3]);
        assert_eq!(prepared.original_order, vec![1, 2, 0]);
    }

    #[test]
    fn test_cardinality_sort_is_stable() {
        let corpus = corpus(&[&["a", "b"], &["c", "d"], &["e", "f"]]);
        let order = GlobalOrder::build(&corpus);
        let prepared = preprocess(&corpus, &order);

        assert_eq!(prepared.original_order, vec![0, 1, 2]);
    }

    #[test]
    fn test_elements_sorted_by_rank_within_record() {
        // "z" is rarest, so it must come first in the rank vector even
        // though it sorts last alphabetically.
        let corpus = corpus(&[&["a", "z"], &["a", "b"], &["a", "b"]]);
        let order = GlobalOrder::build(&corpus);
        let prepared = preprocess(&corpus, &order);

        for ranks in &prepared.records {
            assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        }
        let z = order.rank(&"z".to_string()).unwrap();
        let first = &prepared.records[prepared
            .original_order
            .iter()
            .position(|&id| id == 0)
            .unwrap()];
        assert_eq!(first[0], z);
    }

    #[test]
    fn test_empty_records_survive() {
        let corpus = corpus(&[&["a"], &[]]);
        let order = GlobalOrder::build(&corpus);
        let prepared = preprocess(&corpus, &order);

        assert_eq!(prepared.records[0].len(), 0);
        assert_eq!(prepared.original_order, vec![1, 0]);
    }
}
