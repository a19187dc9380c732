//! keeper-store, SQLite persistence and the wallet service for KeyKeeper
//!
//! # Storage model
//! SQLite holds two tables. `wallets` carries the plaintext metadata (name,
//! creation time, phrase length) and the PIN digest. `words` carries one row
//! per word: the permuted slot and the masked bytes, nothing else. Word order
//! is only recoverable with the PIN.
//!
//! # Layers
//! - `store`  : `RowStore`, the contract the service needs from persistence
//! - `db`     : `Database`, the rusqlite implementation of `RowStore`
//! - `service`: `WalletService`: validation, PIN checks, codec calls
//! - `paths`  : database location resolution
//! - `models` : wallet records
//! - `error`  : unified error type

pub mod db;
pub mod error;
pub mod models;
pub mod paths;
pub mod service;
pub mod store;

pub use db::Database;
pub use error::{Result, StoreError};
pub use models::{OwnerRecord, WalletSummary};
pub use service::WalletService;
pub use store::{RowStore, SealedOwner};
