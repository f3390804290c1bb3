//! Integration tests for the encoded (privacy-preserving) join variant.

use std::collections::HashSet;

use simjoin::tokenize::whitespace_tokens;
use simjoin::{encode, join_encoded, BitVector, JoinError, RecordId, ResultPair};

const KEY: &[u8] = b"shared-key";
const VEC_LEN: usize = 40;
const K: usize = 2;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn encode_dataset(records: &[&str]) -> Vec<BitVector> {
    records
        .iter()
        .map(|r| {
            let tokens: Vec<String> = whitespace_tokens(&r.to_lowercase()).into_iter().collect();
            encode(&tokens, KEY, VEC_LEN, K).unwrap()
        })
        .collect()
}

fn pair(d1: usize, r1: usize, d2: usize, r2: usize) -> ResultPair {
    ResultPair::new(RecordId::new(d1, r1), RecordId::new(d2, r2))
}

#[test]
fn test_encoded_three_dataset_scenario() {
    init_logging();
    let datasets = vec![
        encode_dataset(&["a b d", "a b c", "h k"]),
        encode_dataset(&["a b k", "a b", "h k", "a c h"]),
        encode_dataset(&["a c h"]),
    ];

    let result = join_encoded(&datasets, 0.5, VEC_LEN).unwrap();

    // Identical token sets encode to identical vectors, so the two exact
    // duplicates must match regardless of bit collisions.
    assert!(result.contains(&pair(0, 2, 1, 2)));
    assert!(result.contains(&pair(1, 3, 2, 0)));
    // Three datasets supplied: cross-dataset mode.
    assert!(result.iter().all(|p| !p.is_within_dataset()));
}

#[test]
fn test_encoded_single_dataset_duplicates() {
    let dataset = encode_dataset(&["a c h", "x y z", "a c h"]);
    let result = join_encoded(&[dataset], 1.0, VEC_LEN).unwrap();

    assert!(result.contains(&pair(0, 0, 0, 2)));
    assert!(!result.contains(&pair(0, 0, 0, 1)));
}

#[test]
fn test_encoded_matches_brute_force_over_set_bits() {
    let datasets = vec![
        encode_dataset(&["a b d", "a b c", "h k", "a b"]),
        encode_dataset(&["a b k", "h k", "a c h"]),
    ];

    for step in 0..=10u32 {
        let t = f64::from(step) / 10.0;
        let fast = join_encoded(&datasets, t, VEC_LEN).unwrap();

        // Reference: exact Jaccard over set-bit index sets.
        let flat: Vec<(usize, usize, Vec<u32>)> = datasets
            .iter()
            .enumerate()
            .flat_map(|(d, ds)| {
                ds.iter()
                    .enumerate()
                    .map(move |(r, v)| (d, r, v.set_bits()))
            })
            .collect();
        let mut naive = HashSet::new();
        for i in 0..flat.len() {
            for j in (i + 1)..flat.len() {
                let (d1, r1, b1) = &flat[i];
                let (d2, r2, b2) = &flat[j];
                if d1 == d2 {
                    continue;
                }
                let s1: HashSet<u32> = b1.iter().copied().collect();
                let s2: HashSet<u32> = b2.iter().copied().collect();
                let intersection = s1.intersection(&s2).count();
                let union = s1.len() + s2.len() - intersection;
                let similarity = if union == 0 {
                    0.0
                } else {
                    intersection as f64 / union as f64
                };
                if t == 0.0 || similarity >= t {
                    naive.insert(pair(*d1, *r1, *d2, *r2));
                }
            }
        }

        assert_eq!(fast, naive, "mismatch at threshold {t}");
    }
}

#[test]
fn test_vector_length_mismatch_is_rejected() {
    let good = encode(["a"], KEY, VEC_LEN, K).unwrap();
    let short = encode(["a"], KEY, VEC_LEN - 8, K).unwrap();
    let datasets = vec![vec![good], vec![short]];

    match join_encoded(&datasets, 0.5, VEC_LEN) {
        Err(JoinError::VectorLengthMismatch {
            expected,
            actual,
            dataset,
            record,
        }) => {
            assert_eq!(expected, VEC_LEN);
            assert_eq!(actual, VEC_LEN - 8);
            assert_eq!(dataset, 1);
            assert_eq!(record, 0);
        }
        other => panic!("expected VectorLengthMismatch, got {other:?}"),
    }
}

#[test]
fn test_all_zero_vectors_participate_in_no_pairs() {
    let empty = BitVector::zeros(VEC_LEN);
    let datasets = vec![
        vec![empty.clone(), encode(["a"], KEY, VEC_LEN, K).unwrap()],
        vec![empty, encode(["a"], KEY, VEC_LEN, K).unwrap()],
    ];

    let result = join_encoded(&datasets, 0.5, VEC_LEN).unwrap();
    let expected: HashSet<ResultPair> = [pair(0, 1, 1, 1)].into_iter().collect();
    assert_eq!(result, expected);
}

#[test]
fn test_different_keys_break_cross_party_matching() {
    let tokens = ["a", "c", "h"];
    let ours = encode(tokens, b"key-one", 1024, K).unwrap();
    let theirs = encode(tokens, b"key-two", 1024, K).unwrap();

    // Same record, different keys: the encodings disagree.
    assert_ne!(ours, theirs);
}
