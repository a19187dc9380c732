//! Ordered words <-> unordered `(slot, ciphertext)` rows.
//!
//! Key and permutation are rebuilt on every call and never cached.

use crate::error::{CoreError, Result};
use crate::kdf::{derive_key, SecretKey};
use crate::keystream::{apply_mask, mask_bytes, nonce_for_index};
use crate::permutation::Permutation;
use crate::OwnerId;

/// Length assumed when decrypting with no rows at all.
pub const EMPTY_DECRYPT_LEN: usize = 24;

/// One stored word: its permuted slot and its masked bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    pub slot: usize,
    pub ciphertext: Vec<u8>,
}

fn mask_at(key: &SecretKey, index: usize, data: &[u8]) -> Vec<u8> {
    let nonce = nonce_for_index(key, index);
    let mask = mask_bytes(&nonce, data.len());
    apply_mask(data, &mask)
}

/// Mask each word with the keystream of its logical index and place it at
/// `perm[index]`. Rows come back in logical order; callers must not rely on
/// that.
pub fn encrypt_words<S: AsRef<str>>(words: &[S], pin: &str, owner_id: OwnerId) -> Vec<SlotRow> {
    let key = derive_key(pin, owner_id);
    let perm = Permutation::build(&key, words.len());
    words
        .iter()
        .enumerate()
        .map(|(i, word)| SlotRow {
            slot: perm[i],
            ciphertext: mask_at(&key, i, word.as_ref().as_bytes()),
        })
        .collect()
}

/// Rebuild the ordered list from rows in any order.
///
/// `n` is inferred as `max(slot) + 1`, or 24 when there are no rows. Logical
/// positions without a row come back as empty strings rather than an error;
/// that is how a word deleted by index shows up. Any PIN yields some output,
/// so bytes that are not UTF-8 (a wrong PIN) are decoded lossily.
pub fn decrypt_words(rows: &[SlotRow], pin: &str, owner_id: OwnerId) -> Vec<String> {
    let n = rows
        .iter()
        .map(|row| row.slot.saturating_add(1))
        .max()
        .unwrap_or(EMPTY_DECRYPT_LEN);
    let key = derive_key(pin, owner_id);
    unmask_rows(&key, rows, n)
}

/// Like `decrypt_words`, with the phrase length taken from stored metadata.
///
/// Once the row in slot `n - 1` is deleted the inferred length no longer
/// matches the permutation the rows were written with, so callers that know
/// the recorded length should use this.
pub fn decrypt_words_with_len(
    rows: &[SlotRow],
    pin: &str,
    owner_id: OwnerId,
    phrase_len: usize,
) -> Result<Vec<String>> {
    if let Some(row) = rows.iter().find(|row| row.slot >= phrase_len) {
        return Err(CoreError::SlotOutOfRange {
            slot: row.slot,
            len: phrase_len,
        });
    }
    let key = derive_key(pin, owner_id);
    Ok(unmask_rows(&key, rows, phrase_len))
}

fn unmask_rows(key: &SecretKey, rows: &[SlotRow], n: usize) -> Vec<String> {
    let inverse = Permutation::build(key, n).invert();
    let mut ordered = vec![String::new(); n];
    for row in rows {
        let index = inverse[row.slot];
        let plain = mask_at(key, index, &row.ciphertext);
        ordered[index] = String::from_utf8_lossy(&plain).into_owned();
    }
    ordered
}

/// Slot holding the 1-based logical `index` of a phrase of `phrase_len`
/// words. `phrase_len` must come from stored metadata: after a deletion the
/// inferred `max(slot) + 1` can shrink and would give a different permutation.
pub fn slot_for_index(
    phrase_len: usize,
    pin: &str,
    owner_id: OwnerId,
    index: usize,
) -> Result<usize> {
    if index < 1 || index > phrase_len {
        return Err(CoreError::IndexOutOfRange {
            index,
            len: phrase_len,
        });
    }
    let key = derive_key(pin, owner_id);
    Ok(Permutation::build(&key, phrase_len)[index - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<&'static str> {
        vec!["alpha", "bravo", "charlie"]
    }

    fn phrase(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("w{i}-{}", "x".repeat(i % 11))).collect()
    }

    #[test]
    fn known_answer_three_words() {
        let rows = encrypt_words(&abc(), "1234", 7);
        let got: Vec<(usize, String)> = rows
            .iter()
            .map(|r| (r.slot, hex::encode(&r.ciphertext)))
            .collect();
        assert_eq!(
            got,
            vec![
                (2, "a2b0cace9d".to_string()),
                (0, "fffb35576b".to_string()),
                (1, "4fac0a30a1c986".to_string()),
            ]
        );
    }

    #[test]
    fn round_trip_three_words() {
        let rows = encrypt_words(&abc(), "1234", 7);
        let mut slots: Vec<usize> = rows.iter().map(|r| r.slot).collect();
        slots.sort_unstable();
        assert_eq!(slots, vec![0, 1, 2]);
        assert_eq!(decrypt_words(&rows, "1234", 7), abc());
    }

    #[test]
    fn round_trip_supported_lengths_in_any_row_order() {
        for n in [12, 18, 24] {
            for owner in [1, 2, 99, i64::MAX, -5] {
                let words = phrase(n);
                let mut rows = encrypt_words(&words, "31415", owner);
                assert_eq!(decrypt_words(&rows, "31415", owner), words);
                rows.reverse();
                assert_eq!(decrypt_words(&rows, "31415", owner), words);
                rows.sort_by_key(|r| r.slot);
                assert_eq!(decrypt_words(&rows, "31415", owner), words);
            }
        }
    }

    #[test]
    fn ciphertext_length_matches_word_bytes() {
        let words = ["ä", "ab", "\u{1F510}key"];
        for (row, word) in encrypt_words(&words, "1", 1).iter().zip(words) {
            assert_eq!(row.ciphertext.len(), word.len());
        }
    }

    #[test]
    fn wrong_pin_garbles_without_error() {
        let rows = encrypt_words(&abc(), "1234", 7);
        let out = decrypt_words(&rows, "9999", 7);
        assert_eq!(out.len(), 3);
        assert_ne!(out, abc());
    }

    #[test]
    fn wrong_owner_garbles() {
        let rows = encrypt_words(&abc(), "1234", 7);
        assert_ne!(decrypt_words(&rows, "1234", 8), abc());
    }

    #[test]
    fn missing_row_leaves_gap() {
        let mut rows = encrypt_words(&abc(), "1234", 7);
        let slot = slot_for_index(3, "1234", 7, 2).unwrap();
        rows.retain(|r| r.slot != slot);
        assert_eq!(decrypt_words(&rows, "1234", 7), vec!["alpha", "", "charlie"]);
    }

    #[test]
    fn inferred_length_breaks_when_last_slot_is_gone() {
        let words = phrase(12);
        let mut rows = encrypt_words(&words, "8080", 3);
        rows.retain(|r| r.slot != 11);
        assert_eq!(rows.len(), 11);

        let mut expected = words.clone();
        let gone = rows_missing_index(&words, &rows, "8080", 3);
        expected[gone] = String::new();
        assert_eq!(
            decrypt_words_with_len(&rows, "8080", 3, 12).unwrap(),
            expected
        );
        assert_ne!(decrypt_words(&rows, "8080", 3), expected);
    }

    fn rows_missing_index(words: &[String], rows: &[SlotRow], pin: &str, owner: OwnerId) -> usize {
        (1..=words.len())
            .find(|&i| {
                let slot = slot_for_index(words.len(), pin, owner, i).unwrap();
                rows.iter().all(|r| r.slot != slot)
            })
            .unwrap()
            - 1
    }

    #[test]
    fn with_len_rejects_slot_past_end() {
        let rows = encrypt_words(&abc(), "1234", 7);
        assert_eq!(
            decrypt_words_with_len(&rows, "1234", 7, 2),
            Err(CoreError::SlotOutOfRange { slot: 2, len: 2 })
        );
        assert_eq!(decrypt_words_with_len(&rows, "1234", 7, 3).unwrap(), abc());
    }

    #[test]
    fn no_rows_yields_default_length_of_blanks() {
        let out = decrypt_words(&[], "1234", 7);
        assert_eq!(out.len(), EMPTY_DECRYPT_LEN);
        assert!(out.iter().all(String::is_empty));
    }

    #[test]
    fn slot_for_index_matches_encrypt() {
        let words = phrase(12);
        let rows = encrypt_words(&words, "2020", 11);
        for index in 1..=12 {
            assert_eq!(
                slot_for_index(12, "2020", 11, index).unwrap(),
                rows[index - 1].slot
            );
        }
    }

    #[test]
    fn slot_for_index_bounds() {
        assert_eq!(
            slot_for_index(12, "1", 1, 0),
            Err(CoreError::IndexOutOfRange { index: 0, len: 12 })
        );
        assert_eq!(
            slot_for_index(12, "1", 1, 13),
            Err(CoreError::IndexOutOfRange { index: 13, len: 12 })
        );
        assert!(slot_for_index(12, "1", 1, 12).is_ok());
    }
}
