//! Multi-dataset join orchestration.
//!
//! The `Joiner` runs the complete similarity-join pipeline:
//! 1. **Flatten** - Concatenate all datasets into one corpus with an offset table
//! 2. **Order** - Rank every distinct element by ascending document frequency
//! 3. **Preprocess** - Rank-encode records and sort by ascending cardinality
//! 4. **Candidates** - Prefix/length/positional filtering over an inverted index
//! 5. **Verify** - Exact Jaccard confirmation (parallel)
//! 6. **Remap** - Translate surviving pairs back to `(dataset, record)` identities
//!
//! With a single input dataset the result is the set of within-collection
//! duplicate pairs; with several datasets only cross-dataset matches are
//! reported.

use std::collections::HashSet;
use std::time::Duration;

use crate::encode::BitVector;
use crate::error::JoinError;

use super::candidates::generate_candidates;
use super::order::GlobalOrder;
use super::pairs::{RecordId, ResultPair};
use super::preprocess::preprocess;
use super::verify::verify;
use super::Element;

/// Configuration for a similarity join.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinConfig {
    /// Jaccard similarity threshold in `[0, 1]`. Pairs at or above the
    /// threshold are reported; 0 matches everything.
    pub threshold: f64,
    /// Number of threads for the parallel verification phase.
    pub verify_threads: usize,
}

impl JoinConfig {
    /// Create a configuration with the given threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            verify_threads: 4,
        }
    }

    /// Set the verification thread count.
    #[must_use]
    pub fn with_verify_threads(mut self, threads: usize) -> Self {
        self.verify_threads = threads.max(1);
        self
    }
}

/// Summary statistics from one join invocation.
#[derive(Debug, Clone, Default)]
pub struct JoinSummary {
    /// Number of datasets supplied
    pub datasets: usize,
    /// Total records across all datasets
    pub total_records: usize,
    /// Distinct elements in the corpus
    pub distinct_elements: usize,
    /// Postings-list entries probed during candidate generation
    pub probes: usize,
    /// Probes discarded by the length filter
    pub length_filter_skips: usize,
    /// Pairs discarded by the positional filter
    pub positional_filter_skips: usize,
    /// Candidate pairs sent to verification
    pub candidates: usize,
    /// Pairs confirmed by exact Jaccard
    pub confirmed: usize,
    /// Result pairs after identity remapping and cross-dataset filtering
    pub result_pairs: usize,
    /// Wall-clock duration of the whole invocation
    pub duration: Duration,
}

/// Similarity joiner that orchestrates the filter-and-verify pipeline.
///
/// # Example
///
/// ```
/// use simjoin::{JoinConfig, Joiner};
/// use simjoin::tokenize::whitespace_tokens;
///
/// let ds: Vec<_> = ["a b", "a b", "c d"].iter().map(|s| whitespace_tokens(s)).collect();
///
/// let joiner = Joiner::new(JoinConfig::new(1.0));
/// let (pairs, summary) = joiner.join(&[ds]).unwrap();
///
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(summary.total_records, 3);
/// ```
pub struct Joiner {
    config: JoinConfig,
}

impl Joiner {
    /// Create a new joiner with the given configuration.
    ///
    /// The threshold is validated on `join`, not here, so that a `Joiner`
    /// can be constructed infallibly and reconfigured.
    #[must_use]
    pub fn new(config: JoinConfig) -> Self {
        Self { config }
    }

    /// Create a joiner for the given threshold with default settings.
    #[must_use]
    pub fn with_threshold(threshold: f64) -> Self {
        Self::new(JoinConfig::new(threshold))
    }

    /// Find all record pairs meeting the similarity threshold.
    ///
    /// Each record is a set of elements; each dataset keeps its
    /// caller-supplied order. With one dataset the result contains
    /// within-dataset pairs; with several, only cross-dataset pairs.
    ///
    /// # Errors
    ///
    /// Returns [`JoinError::InvalidThreshold`] when the configured
    /// threshold is outside `[0, 1]`.
    pub fn join<E: Element>(
        &self,
        datasets: &[Vec<HashSet<E>>],
    ) -> Result<(HashSet<ResultPair>, JoinSummary), JoinError> {
        self.validate_threshold()?;

        let mut corpus: Vec<Vec<E>> = Vec::new();
        let mut offsets: Vec<usize> = Vec::with_capacity(datasets.len());
        for dataset in datasets {
            offsets.push(corpus.len());
            for record in dataset {
                corpus.push(record.iter().cloned().collect());
            }
        }

        Ok(self.run(corpus, &offsets))
    }

    /// Find all pairs of encoded records meeting the similarity threshold.
    ///
    /// Records are fixed-length bit-vectors (see [`crate::encode`]); set-bit
    /// positions take the role of elements, so cardinality and prefix
    /// operate over the count and positions of set bits.
    ///
    /// # Errors
    ///
    /// Returns [`JoinError::InvalidThreshold`] for an out-of-range
    /// threshold, or [`JoinError::VectorLengthMismatch`] when a record's
    /// length differs from `vector_length`.
    pub fn join_encoded(
        &self,
        datasets: &[Vec<BitVector>],
        vector_length: usize,
    ) -> Result<(HashSet<ResultPair>, JoinSummary), JoinError> {
        self.validate_threshold()?;

        let mut corpus: Vec<Vec<u32>> = Vec::new();
        let mut offsets: Vec<usize> = Vec::with_capacity(datasets.len());
        for (dataset_idx, dataset) in datasets.iter().enumerate() {
            offsets.push(corpus.len());
            for (record_idx, vector) in dataset.iter().enumerate() {
                if vector.len() != vector_length {
                    return Err(JoinError::VectorLengthMismatch {
                        expected: vector_length,
                        actual: vector.len(),
                        dataset: dataset_idx,
                        record: record_idx,
                    });
                }
                corpus.push(vector.set_bits());
            }
        }

        Ok(self.run(corpus, &offsets))
    }

    fn validate_threshold(&self) -> Result<(), JoinError> {
        let t = self.config.threshold;
        if t.is_nan() || !(0.0..=1.0).contains(&t) {
            return Err(JoinError::InvalidThreshold { value: t });
        }
        Ok(())
    }

    /// Run the pipeline over the flattened corpus.
    fn run<E: Element>(
        &self,
        corpus: Vec<Vec<E>>,
        offsets: &[usize],
    ) -> (HashSet<ResultPair>, JoinSummary) {
        let start = std::time::Instant::now();
        let mut summary = JoinSummary {
            datasets: offsets.len(),
            total_records: corpus.len(),
            ..Default::default()
        };

        if corpus.is_empty() {
            summary.duration = start.elapsed();
            return (HashSet::new(), summary);
        }

        log::info!(
            "Joining {} datasets ({} records) at threshold {}",
            offsets.len(),
            corpus.len(),
            self.config.threshold
        );

        let order = GlobalOrder::build(&corpus);
        summary.distinct_elements = order.len();
        log::debug!("Global order built over {} distinct elements", order.len());

        let prepared = preprocess(&corpus, &order);

        let (candidates, candidate_stats) =
            generate_candidates(&prepared.records, self.config.threshold);
        summary.probes = candidate_stats.probes;
        summary.length_filter_skips = candidate_stats.length_filter_skips;
        summary.positional_filter_skips = candidate_stats.positional_filter_skips;
        summary.candidates = candidate_stats.candidates;

        let (confirmed, verify_stats) = verify(
            &prepared.records,
            candidates,
            self.config.threshold,
            self.config.verify_threads,
        );
        summary.confirmed = verify_stats.confirmed;

        // Remap sorted indices to original identities and apply the
        // cross-dataset rule.
        let multi_dataset = offsets.len() > 1;
        let mut results = HashSet::new();
        for (a, b) in confirmed {
            let r1 = prepared.original_order[a];
            let r2 = prepared.original_order[b];
            if r1 == r2 {
                continue;
            }

            let id1 = locate(offsets, r1.min(r2));
            let id2 = locate(offsets, r1.max(r2));
            if multi_dataset && id1.dataset == id2.dataset {
                continue;
            }
            results.insert(ResultPair::new(id1, id2));
        }

        summary.result_pairs = results.len();
        summary.duration = start.elapsed();
        log::info!(
            "Join complete: {} candidates, {} confirmed, {} result pairs in {:?}",
            summary.candidates,
            summary.confirmed,
            summary.result_pairs,
            summary.duration
        );

        (results, summary)
    }
}

/// Map a global record id to its owning dataset and local index.
///
/// `offsets` is non-decreasing, one starting id per dataset; the owner is
/// the last dataset whose offset is `<= id` and is non-empty at that id
/// (empty datasets share their successor's offset and can own nothing).
fn locate(offsets: &[usize], id: usize) -> RecordId {
    let dataset = offsets.partition_point(|&offset| offset <= id) - 1;
    RecordId::new(dataset, id - offsets[dataset])
}

/// Find all record pairs meeting the similarity threshold.
///
/// Convenience wrapper over [`Joiner`] with default settings. See
/// [`Joiner::join`].
///
/// # Errors
///
/// Returns [`JoinError::InvalidThreshold`] when `threshold` is outside
/// `[0, 1]`.
pub fn join<E: Element>(
    datasets: &[Vec<HashSet<E>>],
    threshold: f64,
) -> Result<HashSet<ResultPair>, JoinError> {
    Joiner::with_threshold(threshold)
        .join(datasets)
        .map(|(pairs, _)| pairs)
}

/// Find all pairs of encoded records meeting the similarity threshold.
///
/// Convenience wrapper over [`Joiner`] with default settings. See
/// [`Joiner::join_encoded`].
///
/// # Errors
///
/// Returns [`JoinError::InvalidThreshold`] for an out-of-range threshold,
/// or [`JoinError::VectorLengthMismatch`] for a record whose length
/// differs from `vector_length`.
pub fn join_encoded(
    datasets: &[Vec<BitVector>],
    threshold: f64,
    vector_length: usize,
) -> Result<HashSet<ResultPair>, JoinError> {
    Joiner::with_threshold(threshold)
        .join_encoded(datasets, vector_length)
        .map(|(pairs, _)| pairs)
}
