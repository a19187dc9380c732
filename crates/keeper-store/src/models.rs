//! Wallet records as read back from `wallets`.

use chrono::{DateTime, Utc};
use keeper_core::OwnerId;
use serde::Serialize;

/// Public metadata of a stored wallet. Never carries secret material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletSummary {
    pub id: OwnerId,
    pub name: String,
    /// Authoritative word count recorded at creation. Rows deleted by index
    /// do not change it.
    pub phrase_len: usize,
    pub created_at: DateTime<Utc>,
}

/// Summary plus the stored PIN digest, used for authentication only.
#[derive(Clone)]
pub struct OwnerRecord {
    pub summary: WalletSummary,
    pub pin_hash: Vec<u8>,
}

impl std::fmt::Debug for OwnerRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnerRecord")
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}
