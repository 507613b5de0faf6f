#![forbid(unsafe_code)]

mod access;
mod config;
mod documents;
mod error;
mod events;
mod requests;
mod support;
mod tags;
mod types;
mod versions;

pub use config::*;
pub use error::StoreError;
pub use requests::*;
pub use types::*;

use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::time::Duration;
use support::*;

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    config: StoreConfig,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with(StoreConfig::for_dir(storage_dir))
    }

    pub fn open_with(config: StoreConfig) -> Result<Self, StoreError> {
        let config = config.normalized();
        std::fs::create_dir_all(&config.storage_dir)?;

        let conn = Connection::open(config.db_path())?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        migrate_sqlite_schema(&conn)?;

        Ok(Self { conn, config })
    }

    /// Opens another connection to the same database. Each concurrent caller
    /// needs its own handle; SQLite serialises the writers.
    pub fn reopen(&self) -> Result<Self, StoreError> {
        Self::open_with(self.config.clone())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Every write path goes through here: `BEGIN IMMEDIATE` takes the write
    /// lock up front, so the document row read that follows is the one we update.
    fn write_tx(&mut self) -> Result<rusqlite::Transaction<'_>, StoreError> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }

    fn page_bounds(&self, page: usize, page_size: Option<usize>) -> Result<Page, StoreError> {
        if page == 0 {
            return Err(StoreError::InvalidInput("page must be >= 1"));
        }
        let size = page_size
            .unwrap_or(self.config.default_page_size)
            .clamp(1, self.config.max_page_size);
        let offset = (page - 1)
            .checked_mul(size)
            .ok_or(StoreError::InvalidInput("numeric overflow"))?;
        Ok(Page {
            page,
            size,
            limit: to_sqlite_i64(size)?,
            offset: to_sqlite_i64(offset)?,
        })
    }
}

struct Page {
    page: usize,
    size: usize,
    limit: i64,
    offset: i64,
}

fn to_sqlite_i64(value: usize) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::InvalidInput("numeric overflow"))
}
