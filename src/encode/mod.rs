//! Privacy-preserving bit-vector encoding of element sets.
//!
//! # Overview
//!
//! An element set is approximated by a fixed-length bit-vector in the
//! Bloom-filter style: each element derives `k` bit positions through
//! double hashing (`h1 + i*h2 mod vector_length`) and sets those bits.
//! Unrelated elements may collide into the same bits (false positives,
//! bounded by the `vector_length`/`k` choice); elements actually encoded
//! can never be missed.
//!
//! The two 64-bit hashes per element come from a single keyed BLAKE3
//! digest, so two parties sharing the key produce identical encodings
//! and can run [`crate::join_encoded`] over the vectors without ever
//! exchanging raw elements.

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// A fixed-length bit array representing an encoded record.
///
/// Downstream joins treat the positions of set bits as the record's
/// elements: cardinality is `count_ones` and prefixes range over sorted
/// set-bit indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitVector {
    blocks: Vec<u64>,
    len: usize,
}

impl BitVector {
    /// Create an all-zero vector of the given bit length.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            blocks: vec![0; len.div_ceil(64)],
            len,
        }
    }

    /// Bit length of the vector.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the vector has zero bit length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; a silently ignored write would
    /// corrupt the encoding.
    pub fn set(&mut self, index: usize) {
        assert!(
            index < self.len,
            "bit index {index} out of range for vector of length {}",
            self.len
        );
        self.blocks[index / 64] |= 1 << (index % 64);
    }

    /// Read the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        assert!(
            index < self.len,
            "bit index {index} out of range for vector of length {}",
            self.len
        );
        self.blocks[index / 64] & (1 << (index % 64)) != 0
    }

    /// Number of set bits (the encoded record's cardinality).
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Indices of all set bits, ascending.
    #[must_use]
    pub fn set_bits(&self) -> Vec<u32> {
        let mut bits = Vec::with_capacity(self.count_ones());
        for (block_idx, &block) in self.blocks.iter().enumerate() {
            let mut remaining = block;
            while remaining != 0 {
                let bit = remaining.trailing_zeros();
                bits.push(block_idx as u32 * 64 + bit);
                remaining &= remaining - 1;
            }
        }
        bits
    }
}

/// Encode an element set into a fixed-length bit-vector.
///
/// For each element, two independent 64-bit hashes `h1`, `h2` are derived
/// from one keyed BLAKE3 digest, and the bits `(h1 + i*h2) mod
/// vector_length` for `i` in `1..=k` are set. The function is pure:
/// identical inputs produce an identical vector on every call.
///
/// `key` may be of any length; it is compressed to the 32-byte BLAKE3
/// key before use.
///
/// # Errors
///
/// Returns [`EncodeError::ZeroVectorLength`] or
/// [`EncodeError::ZeroHashCount`] for degenerate parameters.
///
/// # Example
///
/// ```
/// use simjoin::encode;
///
/// let tokens = ["alice", "smith"];
/// let vector = encode(tokens, b"shared-key", 40, 2).unwrap();
///
/// assert_eq!(vector.len(), 40);
/// assert_eq!(vector, encode(tokens, b"shared-key", 40, 2).unwrap());
/// ```
pub fn encode<I, E>(
    elements: I,
    key: &[u8],
    vector_length: usize,
    k: usize,
) -> Result<BitVector, EncodeError>
where
    I: IntoIterator<Item = E>,
    E: AsRef<[u8]>,
{
    if vector_length == 0 {
        return Err(EncodeError::ZeroVectorLength);
    }
    if k == 0 {
        return Err(EncodeError::ZeroHashCount);
    }

    let keyed = *blake3::hash(key).as_bytes();
    let mut vector = BitVector::zeros(vector_length);

    for element in elements {
        let digest = blake3::keyed_hash(&keyed, element.as_ref());
        let bytes = digest.as_bytes();
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[..8]);
        let h1 = u64::from_le_bytes(word);
        word.copy_from_slice(&bytes[8..16]);
        let h2 = u64::from_le_bytes(word);

        for i in 1..=k as u64 {
            let position = h1.wrapping_add(h2.wrapping_mul(i)) % vector_length as u64;
            vector.set(position as usize);
        }
    }

    Ok(vector)
}
