//! SQLite row store.
//!
//! Applies the schema on open and implements `RowStore` over a single
//! connection guarded by a mutex.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use keeper_core::{OwnerId, SlotRow};
use parking_lot::Mutex;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::models::{OwnerRecord, WalletSummary};
use crate::store::{RowStore, SealedOwner};

const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Recorded for wallets created before `phrase_len` was stored.
pub const LEGACY_PHRASE_LEN: usize = 24;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS wallets(
        id INTEGER PRIMARY KEY,
        name TEXT UNIQUE NOT NULL,
        pin_hash BLOB NOT NULL,
        created_at INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS words(
        id INTEGER PRIMARY KEY,
        wallet_id INTEGER NOT NULL,
        slot INTEGER NOT NULL,
        ciphertext BLOB NOT NULL,
        UNIQUE(wallet_id, slot),
        FOREIGN KEY(wallet_id) REFERENCES wallets(id) ON DELETE CASCADE
    )",
    "CREATE INDEX IF NOT EXISTS idx_words_wallet ON words(wallet_id)",
];

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create the database at `path` and bring the schema up to date.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened database");
        Self::init(conn)
    }

    /// Fresh in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        for stmt in SCHEMA {
            tx.execute(stmt, [])?;
        }
        tx.commit()?;

        if !has_column(&conn, "wallets", "phrase_len")? {
            debug!("adding wallets.phrase_len column");
            conn.execute(
                &format!(
                    "ALTER TABLE wallets ADD COLUMN phrase_len INTEGER NOT NULL DEFAULT {LEGACY_PHRASE_LEN}"
                ),
                [],
            )?;
        }
        Ok(())
    }
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names.iter().any(|name| name == column))
}

fn slot_to_sql(slot: usize) -> Result<i64> {
    i64::try_from(slot).map_err(|_| StoreError::CorruptRow(format!("slot {slot} out of range")))
}

fn insert_rows_in(conn: &Connection, owner_id: OwnerId, rows: &[SlotRow]) -> Result<()> {
    let mut stmt =
        conn.prepare("INSERT INTO words(wallet_id, slot, ciphertext) VALUES (?1, ?2, ?3)")?;
    for row in rows {
        stmt.execute(params![owner_id, slot_to_sql(row.slot)?, row.ciphertext])?;
    }
    Ok(())
}

fn is_unique_violation(err: &rusqlite::Error, column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, Some(msg)) => {
            e.code == ErrorCode::ConstraintViolation && msg.contains(column)
        }
        _ => false,
    }
}

type RawSummary = (OwnerId, String, i64, i64);

fn summary_from_raw((id, name, created_at, phrase_len): RawSummary) -> Result<WalletSummary> {
    let created_at = DateTime::<Utc>::from_timestamp(created_at, 0)
        .ok_or_else(|| StoreError::CorruptRow(format!("wallet {id}: bad created_at")))?;
    let phrase_len = usize::try_from(phrase_len)
        .map_err(|_| StoreError::CorruptRow(format!("wallet {id}: bad phrase_len")))?;
    Ok(WalletSummary {
        id,
        name,
        phrase_len,
        created_at,
    })
}

impl RowStore for Database {
    fn create_owner(
        &self,
        name: &str,
        phrase_len: usize,
        seal: &dyn Fn(OwnerId) -> SealedOwner,
    ) -> Result<OwnerId> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        // The digest is bound to the id, which only exists after the insert.
        tx.execute(
            "INSERT INTO wallets(name, pin_hash, created_at, phrase_len) VALUES (?1, ?2, ?3, ?4)",
            params![name, vec![0u8], Utc::now().timestamp(), phrase_len as i64],
        )
        .map_err(|e| {
            if is_unique_violation(&e, "wallets.name") {
                StoreError::DuplicateName(name.to_string())
            } else {
                StoreError::Database(e)
            }
        })?;
        let owner_id = tx.last_insert_rowid();

        let sealed = seal(owner_id);
        tx.execute(
            "UPDATE wallets SET pin_hash = ?1 WHERE id = ?2",
            params![sealed.pin_hash, owner_id],
        )?;
        insert_rows_in(&tx, owner_id, &sealed.rows)?;
        tx.commit()?;

        debug!(owner_id, rows = sealed.rows.len(), "owner created");
        Ok(owner_id)
    }

    fn insert_rows(&self, owner_id: OwnerId, rows: &[SlotRow]) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        insert_rows_in(&tx, owner_id, rows)?;
        tx.commit()?;
        Ok(())
    }

    fn read_rows(&self, owner_id: OwnerId) -> Result<Vec<SlotRow>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT slot, ciphertext FROM words WHERE wallet_id = ?1")?;
        let raw = stmt
            .query_map(params![owner_id], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, Vec<u8>>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        raw.into_iter()
            .map(|(slot, ciphertext)| -> Result<SlotRow> {
                let slot = usize::try_from(slot).map_err(|_| {
                    StoreError::CorruptRow(format!("wallet {owner_id}: negative slot {slot}"))
                })?;
                Ok(SlotRow { slot, ciphertext })
            })
            .collect()
    }

    fn delete_row(&self, owner_id: OwnerId, slot: usize) -> Result<bool> {
        let conn = self.conn.lock();
        let affected = conn.execute(
            "DELETE FROM words WHERE wallet_id = ?1 AND slot = ?2",
            params![owner_id, slot_to_sql(slot)?],
        )?;
        Ok(affected > 0)
    }

    fn delete_owner(&self, owner_id: OwnerId) -> Result<bool> {
        let conn = self.conn.lock();
        let affected = conn.execute("DELETE FROM wallets WHERE id = ?1", params![owner_id])?;
        Ok(affected > 0)
    }

    fn owner(&self, owner_id: OwnerId) -> Result<Option<OwnerRecord>> {
        let conn = self.conn.lock();
        let raw = conn
            .query_row(
                "SELECT id, name, created_at, phrase_len, pin_hash FROM wallets WHERE id = ?1",
                params![owner_id],
                |row| -> rusqlite::Result<(RawSummary, Vec<u8>)> {
                    Ok((
                        (row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?),
                        row.get::<_, Vec<u8>>(4)?,
                    ))
                },
            )
            .optional()?;

        raw.map(|(summary, pin_hash)| -> Result<OwnerRecord> {
            Ok(OwnerRecord {
                summary: summary_from_raw(summary)?,
                pin_hash,
            })
        })
        .transpose()
    }

    fn list_owners(&self) -> Result<Vec<WalletSummary>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, name, created_at, phrase_len FROM wallets ORDER BY created_at DESC, id DESC",
        )?;
        let raw = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<rusqlite::Result<Vec<RawSummary>>>()?;
        raw.into_iter().map(summary_from_raw).collect()
    }
}
