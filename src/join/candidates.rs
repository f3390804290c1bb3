//! Filter-driven candidate generation (Phase 3).
//!
//! # Overview
//!
//! Scans records in ascending-cardinality order while incrementally building
//! an inverted index over prefix elements. For each record it probes the
//! index with its own prefix and prunes partners through three filters:
//!
//! 1. **Length filter**: partners whose cardinality is below `t * |x|`
//!    cannot reach the threshold at all.
//! 2. **Prefix filter with overlap counters**: a running counter per partner
//!    tracks shared prefix elements; when the remaining elements cannot lift
//!    the counter to the overlap constraint, the partner is abandoned
//!    (counter reset to 0, not capped).
//! 3. **Positional filter**: a per-pair refinement that bounds the overlap
//!    still achievable from the suffixes before paying for the suffix
//!    intersection.
//!
//! Surviving pairs are candidates only; exact Jaccard confirmation happens
//! in the verify phase. All state is owned by one invocation.

use std::collections::HashMap;

/// Statistics from candidate generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CandidateStats {
    /// Records scanned (including empty ones)
    pub records: usize,
    /// Records skipped because they have no elements
    pub empty_records: usize,
    /// Postings-list entries probed
    pub probes: usize,
    /// Probes discarded by the length filter
    pub length_filter_skips: usize,
    /// Pairs discarded by the positional filter
    pub positional_filter_skips: usize,
    /// Pairs emitted for verification
    pub candidates: usize,
}

/// Ceiling with a 10-decimal-place rounding guard.
///
/// `t * len` can land a hair above an exact integer through float noise,
/// which would overshoot the ceiling by one and break the prefix bound.
pub(crate) fn guarded_ceil(x: f64) -> usize {
    ((x * 1e10).round() / 1e10).ceil() as usize
}

/// Number of leading elements that must be indexed so that any record
/// sharing enough elements with one of length `len` is guaranteed to
/// collide with the prefix: `len - ceil(t * len) + 1`, clamped to `len`.
pub(crate) fn prefix_length(len: usize, threshold: f64) -> usize {
    if len == 0 {
        return 0;
    }
    (len - guarded_ceil(threshold * len as f64) + 1).min(len)
}

/// Minimum element overlap two records of the given cardinalities must
/// share to reach Jaccard >= `threshold`.
pub(crate) fn overlap_constraint(len_x: usize, len_y: usize, threshold: f64) -> usize {
    guarded_ceil(threshold / (1.0 + threshold) * (len_x + len_y) as f64)
}

/// Size of the intersection of two ascending rank slices.
pub(crate) fn intersect_count(a: &[u32], b: &[u32]) -> usize {
    let mut count = 0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Generate unverified candidate pairs over a prepared corpus.
///
/// `records` must be sorted by ascending cardinality with elements sorted
/// by rank; pairs are emitted as `(earlier_index, later_index)` in that
/// sorted index space.
///
/// At `threshold == 0` every distinct pair matches by definition, so all
/// filtering is bypassed and the full cross product (minus self-pairs)
/// is returned.
pub(crate) fn generate_candidates(
    records: &[Vec<u32>],
    threshold: f64,
) -> (Vec<(usize, usize)>, CandidateStats) {
    let mut stats = CandidateStats {
        records: records.len(),
        ..Default::default()
    };

    if threshold == 0.0 {
        let mut all = Vec::new();
        for x in 0..records.len() {
            for y in 0..x {
                all.push((y, x));
            }
        }
        stats.candidates = all.len();
        log::debug!(
            "Candidate generation bypassed at threshold 0: {} pairs",
            all.len()
        );
        return (all, stats);
    }

    // rank -> postings of (record index, prefix position), grown as
    // records are scanned.
    let mut index: HashMap<u32, Vec<(usize, usize)>> = HashMap::new();
    let mut candidates = Vec::new();

    for (x_idx, xr) in records.iter().enumerate() {
        if xr.is_empty() {
            stats.empty_records += 1;
            continue;
        }

        let xp = prefix_length(xr.len(), threshold);
        log::trace!(
            "Record {}: cardinality {}, prefix length {}",
            x_idx,
            xr.len(),
            xp
        );
        let mut overlap_by_partner: HashMap<usize, usize> = HashMap::new();

        for (i, &element) in xr.iter().take(xp).enumerate() {
            if let Some(postings) = index.get(&element) {
                for &(y_idx, j) in postings {
                    stats.probes += 1;
                    let yr = &records[y_idx];

                    // Length filter: y is too short to ever reach the
                    // threshold against x.
                    if (yr.len() as f64) < threshold * xr.len() as f64 {
                        stats.length_filter_skips += 1;
                        continue;
                    }

                    let alpha = overlap_constraint(xr.len(), yr.len(), threshold);
                    let upper_bound = 1 + (xr.len() - i).min(yr.len() - j);
                    let counter = overlap_by_partner.entry(y_idx).or_insert(0);
                    if *counter + upper_bound >= alpha {
                        *counter += 1;
                    } else {
                        // Abandoned as unreachable given evidence so far.
                        *counter = 0;
                    }
                }
            }
            index.entry(element).or_default().push((x_idx, i));
        }

        // Positional filter over every probed partner, zero counters
        // included: a late reset must not hide a pair the suffixes can
        // still save.
        for (&y_idx, &counted) in &overlap_by_partner {
            let yr = &records[y_idx];
            let yp = prefix_length(yr.len(), threshold);
            let alpha = overlap_constraint(xr.len(), yr.len(), threshold);
            let wx = xr[xp - 1];
            let wy = yr[yp - 1];

            let mut overlap = counted;
            if wx < wy {
                // x's prefix ends on the rarer side; its suffix is the
                // cheaper one to bound.
                if overlap + xr.len() - xp >= alpha {
                    overlap += intersect_count(&yr[overlap.min(yr.len())..], &xr[xp..]);
                }
            } else if overlap + yr.len() - yp >= alpha {
                overlap += intersect_count(&xr[overlap.min(xr.len())..], &yr[yp..]);
            }

            if overlap >= alpha {
                candidates.push((y_idx, x_idx));
            } else {
                stats.positional_filter_skips += 1;
            }
        }
    }

    stats.candidates = candidates.len();
    log::debug!(
        "Candidate generation: {} records, {} probes, {} length-filtered, \
         {} position-filtered, {} candidates",
        stats.records,
        stats.probes,
        stats.length_filter_skips,
        stats.positional_filter_skips,
        stats.candidates
    );

    (candidates, stats)
}
