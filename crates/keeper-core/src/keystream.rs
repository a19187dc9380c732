//! Per-index keystream masking.

use sha2::{Digest, Sha256};

use crate::kdf::SecretKey;
use crate::prng::XorShift128Plus;

pub const NONCE_LEN: usize = 16;

/// `SHA-256(key || (index mod 256))[..16]`.
///
/// Only the low byte of the index is hashed, so indices 256 apart share a
/// nonce. Stored rows were written this way and must stay readable.
pub fn nonce_for_index(key: &SecretKey, index: usize) -> [u8; NONCE_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.update([index as u8]);
    let digest = hasher.finalize();
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&digest[..NONCE_LEN]);
    nonce
}

/// `len` bytes of keystream: successive generator outputs, each as 8
/// little-endian bytes, truncated at the end.
pub fn mask_bytes(seed: &[u8], len: usize) -> Vec<u8> {
    let mut rng = XorShift128Plus::from_seed(seed);
    let mut out = Vec::with_capacity(len + 8);
    while out.len() < len {
        out.extend_from_slice(&rng.next_u64().to_le_bytes());
    }
    out.truncate(len);
    out
}

/// XOR `data` with `mask`. Applying the same mask twice restores `data`.
pub fn apply_mask(data: &[u8], mask: &[u8]) -> Vec<u8> {
    debug_assert_eq!(data.len(), mask.len());
    data.iter().zip(mask).map(|(d, m)| d ^ m).collect()
}
