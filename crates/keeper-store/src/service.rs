//! Wallet operations on top of a `RowStore`.
//!
//! Input is validated before any key is derived, and the PIN is checked
//! against the stored digest before anything is decrypted or deleted. The
//! codec itself accepts any PIN, so this is the only gate.

use keeper_core::phrase::{validate_pin, validate_words};
use keeper_core::{
    decrypt_words_with_len, encrypt_words, pin_digest, slot_for_index, verify_pin_digest,
    OwnerId,
};
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::models::{OwnerRecord, WalletSummary};
use crate::store::{RowStore, SealedOwner};

pub const EXPORT_SEPARATOR: &str = ", ";

pub struct WalletService<S> {
    store: S,
}

impl<S: RowStore> WalletService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store `words` under `pin`. Rows and digest are written in one
    /// transaction together with the wallet record.
    pub fn create<W: AsRef<str>>(&self, name: &str, pin: &str, words: &[W]) -> Result<OwnerId> {
        validate_pin(pin)?;
        let len = validate_words(words)?;

        let seal = |owner_id: OwnerId| SealedOwner {
            pin_hash: pin_digest(pin, owner_id),
            rows: encrypt_words(words, pin, owner_id),
        };
        let owner_id = self.store.create_owner(name, len.words(), &seal)?;
        info!(owner_id, phrase_len = len.words(), "wallet created");
        Ok(owner_id)
    }

    pub fn list(&self) -> Result<Vec<WalletSummary>> {
        self.store.list_owners()
    }

    pub fn wallet(&self, owner_id: OwnerId) -> Result<WalletSummary> {
        Ok(self.owner(owner_id)?.summary)
    }

    pub fn verify_pin(&self, owner_id: OwnerId, pin: &str) -> Result<bool> {
        let owner = self.owner(owner_id)?;
        Ok(verify_pin_digest(pin, owner_id, &owner.pin_hash))
    }

    /// Words in their original order. A word removed with `delete_word_at`
    /// comes back as an empty string.
    pub fn ordered_words(&self, owner_id: OwnerId, pin: &str) -> Result<Vec<String>> {
        let owner = self.authenticate(owner_id, pin)?;
        let rows = self.store.read_rows(owner_id)?;
        debug!(owner_id, rows = rows.len(), "decrypting wallet");
        Ok(decrypt_words_with_len(
            &rows,
            pin,
            owner_id,
            owner.summary.phrase_len,
        )?)
    }

    /// Ordered words joined with `", "`.
    pub fn export(&self, owner_id: OwnerId, pin: &str) -> Result<String> {
        Ok(self.ordered_words(owner_id, pin)?.join(EXPORT_SEPARATOR))
    }

    pub fn delete(&self, owner_id: OwnerId) -> Result<()> {
        if !self.store.delete_owner(owner_id)? {
            return Err(StoreError::WalletNotFound(owner_id));
        }
        info!(owner_id, "wallet deleted");
        Ok(())
    }

    /// Remove the word at 1-based `index`. The slot is computed from the
    /// recorded phrase length, never from the rows that remain. Returns false
    /// when that word had already been removed.
    pub fn delete_word_at(&self, owner_id: OwnerId, pin: &str, index: usize) -> Result<bool> {
        let owner = self.authenticate(owner_id, pin)?;
        let slot = slot_for_index(owner.summary.phrase_len, pin, owner_id, index)?;
        let removed = self.store.delete_row(owner_id, slot)?;
        info!(owner_id, index, removed, "word deleted");
        Ok(removed)
    }

    fn owner(&self, owner_id: OwnerId) -> Result<OwnerRecord> {
        self.store
            .owner(owner_id)?
            .ok_or(StoreError::WalletNotFound(owner_id))
    }

    fn authenticate(&self, owner_id: OwnerId, pin: &str) -> Result<OwnerRecord> {
        let owner = self.owner(owner_id)?;
        if !verify_pin_digest(pin, owner_id, &owner.pin_hash) {
            warn!(owner_id, "PIN rejected");
            return Err(StoreError::InvalidPin);
        }
        Ok(owner)
    }
}
