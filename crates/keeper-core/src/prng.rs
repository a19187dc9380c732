//! xorshift128+ sequence generator.
//!
//! The shift constants (23, 17, 26) and the seeding rule are part of the
//! stored format: every permutation and mask already on disk was produced
//! by exactly this recipe.

use sha2::{Digest, Sha256};

/// Generator state. Owned by a single call, never shared.
#[derive(Debug, Clone)]
pub struct XorShift128Plus {
    s0: u64,
    s1: u64,
}

impl XorShift128Plus {
    /// Seeds with bytes `[0..8]` and `[8..16]` (little-endian). Seeds shorter
    /// than 16 bytes are hashed with SHA-256 first and the digest is used.
    pub fn from_seed(seed: &[u8]) -> Self {
        if seed.len() >= 16 {
            Self::from_state_bytes(seed)
        } else {
            let digest = Sha256::digest(seed);
            Self::from_state_bytes(&digest)
        }
    }

    fn from_state_bytes(bytes: &[u8]) -> Self {
        let mut s0 = [0u8; 8];
        let mut s1 = [0u8; 8];
        s0.copy_from_slice(&bytes[..8]);
        s1.copy_from_slice(&bytes[8..16]);
        Self {
            s0: u64::from_le_bytes(s0),
            s1: u64::from_le_bytes(s1),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut t = self.s0;
        let s1 = self.s1;
        self.s0 = s1;
        t ^= t << 23;
        t ^= t >> 17;
        t ^= s1;
        t ^= s1 >> 26;
        self.s1 = t;
        self.s0.wrapping_add(self.s1)
    }
}

impl Iterator for XorShift128Plus {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        Some(self.next_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_byte_seed_is_used_directly() {
        let seed: Vec<u8> = (0u8..16).collect();
        let mut rng = XorShift128Plus::from_seed(&seed);
        assert_eq!(rng.next_u64(), 0x9917_d894_9493_1393);
        assert_eq!(rng.next_u64(), 0x8d0b_d2af_ca7e_b0af);
        assert_eq!(rng.next_u64(), 0x5051_3634_0cf1_299f);
    }

    #[test]
    fn short_seed_is_hashed() {
        let mut rng = XorShift128Plus::from_seed(b"abc");
        assert_eq!(rng.next_u64(), 0x3154_e0cc_8fe4_a0c8);
        assert_eq!(rng.next_u64(), 0x1231_ed65_367a_9991);
    }

    #[test]
    fn bytes_past_sixteen_are_ignored() {
        let mut long: Vec<u8> = (0u8..16).collect();
        long.extend_from_slice(&[0xff; 16]);
        let a: Vec<u64> = XorShift128Plus::from_seed(&long).take(8).collect();
        let b: Vec<u64> = XorShift128Plus::from_seed(&long[..16]).take(8).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_seed_still_produces_state() {
        let mut rng = XorShift128Plus::from_seed(&[]);
        let first = rng.next_u64();
        let second = rng.next_u64();
        assert_ne!(first, second);
    }
}
