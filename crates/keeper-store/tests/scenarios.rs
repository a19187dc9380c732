//! End-to-end behaviour of the codec against the SQLite row store.
//!
//! Covers:
//!  1. Three-word round trip through storage
//!  2. Wrong PIN garbles instead of failing in the codec
//!  3. Deleting a logical index leaves a gap
//!  4. Service-level errors: bad input, bad PIN, bad index, missing wallet
//!  5. Data survives closing and reopening the database file

use keeper_core::{
    decrypt_words, encrypt_words, pin_digest, slot_for_index, CoreError, OwnerId,
};
use keeper_store::{Database, RowStore, SealedOwner, StoreError, WalletService};
use tempfile::tempdir;

const WORDS: [&str; 3] = ["alpha", "bravo", "charlie"];

/// Helper: store the three words for a fresh owner, bypassing length checks.
fn store_three(db: &Database, pin: &str) -> OwnerId {
    db.create_owner("three", WORDS.len(), &|owner| SealedOwner {
        pin_hash: pin_digest(pin, owner),
        rows: encrypt_words(&WORDS, pin, owner),
    })
    .unwrap()
}

fn twelve() -> Vec<String> {
    [
        "abandon", "ability", "able", "about", "above", "absent", "absorb", "abstract", "absurd",
        "abuse", "access", "accident",
    ]
    .iter()
    .map(|w| w.to_string())
    .collect()
}

// ─── Scenario 1: round trip ─────────────────────────────────────────────────

#[test]
fn three_words_round_trip_through_store() {
    let db = Database::open_in_memory().unwrap();
    let id = store_three(&db, "1234");

    let rows = db.read_rows(id).unwrap();
    let mut slots: Vec<usize> = rows.iter().map(|r| r.slot).collect();
    slots.sort_unstable();
    assert_eq!(slots, vec![0, 1, 2]);

    assert_eq!(decrypt_words(&rows, "1234", id), WORDS);
}

#[test]
fn stored_rows_do_not_contain_plaintext() {
    let db = Database::open_in_memory().unwrap();
    let id = store_three(&db, "1234");
    for row in db.read_rows(id).unwrap() {
        for word in WORDS {
            assert_ne!(row.ciphertext, word.as_bytes());
        }
    }
}

// ─── Scenario 2: wrong PIN ──────────────────────────────────────────────────

#[test]
fn wrong_pin_yields_garbage_not_error() {
    let db = Database::open_in_memory().unwrap();
    let id = store_three(&db, "1234");
    let rows = db.read_rows(id).unwrap();

    let out = decrypt_words(&rows, "9999", id);
    assert_eq!(out.len(), 3);
    assert_ne!(out, WORDS);
}

// ─── Scenario 3: delete by logical index ────────────────────────────────────

#[test]
fn deleting_index_two_leaves_gap() {
    let db = Database::open_in_memory().unwrap();
    let id = store_three(&db, "1234");

    let slot = slot_for_index(3, "1234", id, 2).unwrap();
    assert!(db.delete_row(id, slot).unwrap());

    let rows = db.read_rows(id).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(decrypt_words(&rows, "1234", id), ["alpha", "", "charlie"]);
}

// ─── Service errors ─────────────────────────────────────────────────────────

#[test]
fn service_error_taxonomy() {
    let svc = WalletService::new(Database::open_in_memory().unwrap());

    assert!(matches!(
        svc.create("w", "1234", &WORDS),
        Err(StoreError::Core(CoreError::InvalidPhraseLength(3)))
    ));
    assert!(matches!(
        svc.create("w", "pin!", &twelve()),
        Err(StoreError::Core(CoreError::InvalidPin))
    ));

    let id = svc.create("w", "1234", &twelve()).unwrap();
    assert!(matches!(
        svc.create("w", "1234", &twelve()),
        Err(StoreError::DuplicateName(_))
    ));
    assert!(matches!(
        svc.export(id, "4321"),
        Err(StoreError::InvalidPin)
    ));
    assert!(matches!(
        svc.delete_word_at(id, "1234", 13),
        Err(StoreError::Core(CoreError::IndexOutOfRange { index: 13, len: 12 }))
    ));
    assert!(matches!(
        svc.ordered_words(id + 1, "1234"),
        Err(StoreError::WalletNotFound(_))
    ));
    assert!(StoreError::InvalidPin.is_user_error());
}

#[test]
fn service_delete_word_then_view() {
    let svc = WalletService::new(Database::open_in_memory().unwrap());
    let words = twelve();
    let id = svc.create("main", "2580", &words).unwrap();

    svc.delete_word_at(id, "2580", 2).unwrap();
    let got = svc.ordered_words(id, "2580").unwrap();
    assert_eq!(got[0], words[0]);
    assert_eq!(got[1], "");
    assert_eq!(&got[2..], &words[2..]);
    assert_eq!(svc.wallet(id).unwrap().phrase_len, 12);
}

// ─── Persistence ────────────────────────────────────────────────────────────

#[test]
fn survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vault.db");
    let words = twelve();

    let id = {
        let svc = WalletService::new(Database::open(&path).unwrap());
        svc.create("persisted", "000111", &words).unwrap()
    };

    let svc = WalletService::new(Database::open(&path).unwrap());
    let listed = svc.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "persisted");
    assert_eq!(svc.ordered_words(id, "000111").unwrap(), words);
}
