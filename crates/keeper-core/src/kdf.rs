//! Key derivation
//!
//! `derive_key`: SHA-256 over `pin || le64(owner_id)`. The owner id is the
//!   only salt; there is no stretching.
//!
//! `pin_digest`: the authentication digest stored next to a wallet.

use sha2::{Digest, Sha256};
use zeroize::ZeroizeOnDrop;

use crate::OwnerId;

pub const KEY_LEN: usize = 32;

/// 32-byte key rooted in (PIN, owner id). Zeroized on drop, never persisted.
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

fn pin_owner_hash(pin: &str, owner_id: OwnerId) -> [u8; KEY_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(pin.as_bytes());
    hasher.update(owner_id.to_le_bytes());
    hasher.finalize().into()
}

/// Derive the per-wallet key. Infallible for any PIN bytes and any id.
pub fn derive_key(pin: &str, owner_id: OwnerId) -> SecretKey {
    SecretKey(pin_owner_hash(pin, owner_id))
}

/// Digest compared against `wallets.pin_hash` before any decrypt or delete.
///
/// Same construction as `derive_key`; existing databases store exactly these
/// bytes, so the two cannot diverge without orphaning every stored wallet.
pub fn pin_digest(pin: &str, owner_id: OwnerId) -> Vec<u8> {
    pin_owner_hash(pin, owner_id).to_vec()
}

/// Compare a candidate PIN against a stored digest.
pub fn verify_pin_digest(pin: &str, owner_id: OwnerId, stored: &[u8]) -> bool {
    let expected = pin_owner_hash(pin, owner_id);
    if stored.len() != expected.len() {
        return false;
    }
    stored
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
