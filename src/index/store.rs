//! Read-only SQLite media store.
//!
//! The store is expected to hold an `images` table with at least a `path`
//! text column and a `date_added` integer column (unix seconds). It is
//! opened per query, so a store can be handed to the loader thread freely.

use std::path::PathBuf;

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info, warn};

use super::MediaIndex;
use crate::error::IndexError;
use crate::models::ImageRecord;

const QUERY_NEWEST_FIRST: &str = "SELECT path, date_added FROM images ORDER BY date_added DESC";

#[derive(Debug, Clone)]
pub struct StoreIndex {
    db_path: PathBuf,
}

impl StoreIndex {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    fn open(&self) -> Result<Connection, IndexError> {
        Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| IndexError::Open {
            path: self.db_path.clone(),
            source,
        })
    }
}

impl MediaIndex for StoreIndex {
    fn query(&self) -> Result<Vec<ImageRecord>, IndexError> {
        let conn = self.open()?;
        debug!(db = ?self.db_path, "Querying media store");

        let mut stmt = conn.prepare(QUERY_NEWEST_FIRST)?;
        let records: Vec<ImageRecord> = stmt
            .query_map([], |row| {
                Ok(ImageRecord::new(
                    PathBuf::from(row.get::<_, String>(0)?),
                    row.get(1)?,
                ))
            })?
            .filter_map(|row| match row {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed media store row");
                    None
                }
            })
            .collect();

        info!(count = records.len(), "Media store listed");
        Ok(records)
    }
}
