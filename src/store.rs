//! Key-value store for short links
//!
//! Short links live in a single flat redb table: the short code is the key and
//! the long URL is the value. There are no secondary indices.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};

use crate::model::ShortLink;

/// Table mapping short codes to target URLs
///
/// Key: short code (e.g. "abc123")
/// Value: long URL exactly as it was accepted (e.g. "https://example.com/page")
pub const TABLE_LINKS: TableDefinition<&str, &str> = TableDefinition::new("links_v1");

/// Cloneable handle to the embedded database
///
/// All clones share the same underlying `Database`. Methods are blocking and
/// should be called from `tokio::task::spawn_blocking` inside async code.
#[derive(Clone)]
pub struct LinkStore {
    db: Arc<Database>,
}

impl LinkStore {
    /// Creates or opens the database file at `path` and makes sure the
    /// links table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, redb::Error> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(TABLE_LINKS)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Looks up the link stored under `code`.
    pub fn get(&self, code: &str) -> Result<Option<ShortLink>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_LINKS)?;

        let link = table.get(code)?.map(|guard| ShortLink {
            code: code.to_string(),
            target: guard.value().to_string(),
        });

        Ok(link)
    }

    /// Inserts `link` unless its code is already taken.
    ///
    /// Returns `false` without writing anything when the code exists. The
    /// check and the insert run in one write transaction, and redb allows a
    /// single writer at a time, so two callers can never claim the same code.
    pub fn insert_new(&self, link: &ShortLink) -> Result<bool, redb::Error> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE_LINKS)?;

            if table.get(link.code.as_str())?.is_some() {
                return Ok(false);
            }

            table.insert(link.code.as_str(), link.target.as_str())?;
        }
        write_txn.commit()?;

        Ok(true)
    }

    /// Number of stored links.
    pub fn len(&self) -> Result<u64, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_LINKS)?;
        Ok(table.len()?)
    }

    pub fn is_empty(&self) -> Result<bool, redb::Error> {
        Ok(self.len()? == 0)
    }
}
