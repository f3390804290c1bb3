//! Exact Jaccard verification of candidate pairs (Phase 4).
//!
//! Candidates arrive pre-filtered but unverified; the externally observable
//! result never trusts the incremental overlap counters. Each pair's
//! similarity is recomputed from scratch over the two rank vectors. Ranks
//! are a bijection of the original elements within one invocation, so
//! rank-set Jaccard equals element-set Jaccard.
//!
//! Verification is embarrassingly parallel and runs on a bounded rayon
//! pool; candidate generation remains the sequential critical path.

use rayon::prelude::*;

use super::candidates::intersect_count;

/// Statistics from the verification phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct VerifyStats {
    /// Candidate pairs received
    pub candidates: usize,
    /// Pairs confirmed at or above the threshold
    pub confirmed: usize,
}

/// Exact Jaccard similarity of two ascending rank vectors.
///
/// Returns 0 when both records are empty; a pair of empty sets shares
/// nothing to be similar about.
pub(crate) fn jaccard(a: &[u32], b: &[u32]) -> f64 {
    let intersection = intersect_count(a, b);
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Confirm candidates by exact similarity, in parallel.
///
/// At `threshold == 0` every candidate is a match by definition and the
/// Jaccard computation is skipped entirely (empty records would otherwise
/// hit the 0/0 case).
pub(crate) fn verify(
    records: &[Vec<u32>],
    candidates: Vec<(usize, usize)>,
    threshold: f64,
    threads: usize,
) -> (Vec<(usize, usize)>, VerifyStats) {
    let mut stats = VerifyStats {
        candidates: candidates.len(),
        ..Default::default()
    };

    if threshold == 0.0 {
        stats.confirmed = candidates.len();
        return (candidates, stats);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .unwrap_or_else(|_| {
            log::warn!(
                "Failed to create custom thread pool, using global pool with {} threads",
                rayon::current_num_threads()
            );
            rayon::ThreadPoolBuilder::new().build().unwrap()
        });

    let confirmed: Vec<(usize, usize)> = pool.install(|| {
        candidates
            .into_par_iter()
            .filter(|&(a, b)| jaccard(&records[a], &records[b]) >= threshold)
            .collect()
    });

    stats.confirmed = confirmed.len();
    log::debug!(
        "Verification: {} candidates, {} confirmed",
        stats.candidates,
        stats.confirmed
    );

    (confirmed, stats)
}
