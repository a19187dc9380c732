use keeper_core::{OwnerId, SlotRow};

use crate::error::Result;
use crate::models::{OwnerRecord, WalletSummary};

/// Secret-derived values for a new owner, computed once its id is known.
#[derive(Debug, Clone)]
pub struct SealedOwner {
    pub pin_hash: Vec<u8>,
    pub rows: Vec<SlotRow>,
}

/// Persistence contract for slot rows and owner metadata.
///
/// Ciphertext is opaque here. Implementations must make multi-row writes
/// atomic and reject a second row for the same `(owner, slot)`.
pub trait RowStore {
    /// Insert the owner, then the digest and rows that `seal` derives from the
    /// assigned id, as one unit. Nothing is visible if any step fails.
    fn create_owner(
        &self,
        name: &str,
        phrase_len: usize,
        seal: &dyn Fn(OwnerId) -> SealedOwner,
    ) -> Result<OwnerId>;

    /// Atomic: all rows or none.
    fn insert_rows(&self, owner_id: OwnerId, rows: &[SlotRow]) -> Result<()>;

    /// All rows of an owner, in no particular order.
    fn read_rows(&self, owner_id: OwnerId) -> Result<Vec<SlotRow>>;

    /// Returns false when no row occupied that slot.
    fn delete_row(&self, owner_id: OwnerId, slot: usize) -> Result<bool>;

    /// Removes the owner and, by cascade, all of its rows. Returns false when
    /// the owner did not exist.
    fn delete_owner(&self, owner_id: OwnerId) -> Result<bool>;

    fn owner(&self, owner_id: OwnerId) -> Result<Option<OwnerRecord>>;

    /// Newest first.
    fn list_owners(&self) -> Result<Vec<WalletSummary>>;
}
