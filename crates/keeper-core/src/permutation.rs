//! Keyed permutation of logical word positions onto storage slots.

use crate::kdf::SecretKey;
use crate::prng::XorShift128Plus;

/// Bijection from logical index `i` to slot `perm[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Fisher-Yates from the last index down to 1, drawing
    /// `j = next() % (i + 1)` from a generator seeded with `key[..16]`.
    ///
    /// A different `n` reshuffles from scratch; permutations of different
    /// lengths under one key are unrelated.
    pub fn build(key: &SecretKey, n: usize) -> Self {
        let mut perm: Vec<usize> = (0..n).collect();
        let mut rng = XorShift128Plus::from_seed(&key.as_bytes()[..16]);
        for i in (1..n).rev() {
            let j = (rng.next_u64() % (i as u64 + 1)) as usize;
            perm.swap(i, j);
        }
        Self(perm)
    }

    /// Inverse mapping: `inverse[perm[i]] == i`.
    pub fn invert(&self) -> Self {
        let mut inverse = vec![0usize; self.0.len()];
        for (i, &slot) in self.0.iter().enumerate() {
            inverse[slot] = i;
        }
        Self(inverse)
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.0.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl std::ops::Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, index: usize) -> &usize {
        &self.0[index]
    }
}
