//! keeper-core, PIN-bound obfuscation of recovery phrases
//!
//! An ordered word list is turned into unordered `(slot, ciphertext)` rows:
//! the slot of each word comes from a permutation keyed by the PIN and the
//! owner id, and each word is XOR-masked with a keystream seeded per index.
//! Nothing here is authenticated encryption; the output is a deterministic
//! transform whose byte layout is fixed by data already on disk.
//!
//! # Module layout
//! - `kdf`        : SHA-256 key derivation from (PIN, owner id), PIN digest
//! - `prng`       : xorshift128+ sequence generator
//! - `permutation`: keyed Fisher-Yates permutation and its inverse
//! - `keystream`  : per-index nonces, mask generation, XOR application
//! - `codec`      : words <-> slot rows, logical index -> slot translation
//! - `phrase`     : input validation (phrase length, words, PIN)
//! - `error`      : unified error type
//!
//! Every function in this crate is pure: no I/O, no shared state.

pub mod codec;
pub mod error;
pub mod kdf;
pub mod keystream;
pub mod permutation;
pub mod phrase;
pub mod prng;

pub use codec::{decrypt_words, decrypt_words_with_len, encrypt_words, slot_for_index, SlotRow};
pub use error::{CoreError, Result};
pub use kdf::{derive_key, pin_digest, verify_pin_digest, SecretKey};
pub use permutation::Permutation;
pub use phrase::PhraseLength;

/// Storage-assigned identifier of a wallet. Keys are bound to it, so it must
/// exist before anything is encrypted.
pub type OwnerId = i64;
