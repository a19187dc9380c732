use keeper_core::{CoreError, OwnerId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("invalid PIN")]
    InvalidPin,

    #[error("wallet not found: {0}")]
    WalletNotFound(OwnerId),

    #[error("a wallet named {0:?} already exists")]
    DuplicateName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt stored row: {0}")]
    CorruptRow(String),
}

impl StoreError {
    /// True when the caller supplied bad input rather than the store failing.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Core(_) | Self::InvalidPin | Self::WalletNotFound(_) | Self::DuplicateName(_)
        )
    }
}
