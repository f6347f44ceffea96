//! SQLite-backed repository storing records as JSON bodies.
//!
//! # Responsibility
//! - Persist any `Record` type in the shared `records` table.
//! - Keep insertion order through the table's autoincrement `seq`.
//!
//! # Invariants
//! - The connection passed in has migrations applied (`db::open_db*`).
//! - Id assignment runs inside the same transaction as the insert.

use super::{id_space_exhausted, not_found, RepoResult, Repository};
use crate::model::{successor_id, Record, RecordId};
use chrono::NaiveDate;
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

/// Connection handle shared by the repositories of every collection.
pub type SharedConnection = Arc<Mutex<Connection>>;

pub struct SqliteRepository<T: Record> {
    conn: SharedConnection,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> SqliteRepository<T> {
    pub fn new(conn: SharedConnection) -> Self {
        Self {
            conn,
            _record: PhantomData,
        }
    }

    /// Inserts `records` with their own ids when the collection has no rows.
    ///
    /// Returns how many records were inserted (0 when data already exists).
    pub fn seed_if_empty(&self, records: Vec<T>) -> RepoResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let existing: i64 = tx.query_row(
            "SELECT COUNT(*) FROM records WHERE collection = ?1;",
            [T::COLLECTION],
            |row| row.get(0),
        )?;
        if existing > 0 {
            return Ok(0);
        }

        for record in &records {
            tx.execute(
                "INSERT INTO records (collection, id, body) VALUES (?1, ?2, ?3);",
                params![T::COLLECTION, record.id(), serde_json::to_string(record)?],
            )?;
        }
        tx.commit()?;

        info!(
            "event=seed_load module=repo status=ok collection={} count={}",
            T::COLLECTION,
            records.len()
        );
        Ok(records.len())
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| super::RepoError::Poisoned(T::COLLECTION))
    }
}

impl<T: Record> Repository<T> for SqliteRepository<T> {
    fn list(&self) -> RepoResult<Vec<T>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT body FROM records WHERE collection = ?1 ORDER BY seq ASC;")?;
        let mut rows = stmt.query([T::COLLECTION])?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let body: String = row.get(0)?;
            records.push(serde_json::from_str(&body)?);
        }
        Ok(records)
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<T>> {
        let conn = self.lock()?;
        match select_body(&conn, T::COLLECTION, id)? {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    fn create(&self, draft: T::Draft, created_on: NaiveDate) -> RepoResult<T> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let max_id: Option<RecordId> = tx.query_row(
            "SELECT MAX(id) FROM records WHERE collection = ?1;",
            [T::COLLECTION],
            |row| row.get(0),
        )?;
        let id = successor_id(max_id).ok_or_else(id_space_exhausted::<T>)?;
        let record = T::from_draft(id, draft, created_on);

        tx.execute(
            "INSERT INTO records (collection, id, body) VALUES (?1, ?2, ?3);",
            params![T::COLLECTION, id, serde_json::to_string(&record)?],
        )?;
        tx.commit()?;

        Ok(record)
    }

    fn update(&self, id: RecordId, patch: &T::Patch) -> RepoResult<T> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let body = select_body(&tx, T::COLLECTION, id)?.ok_or_else(|| not_found::<T>(id))?;
        let mut record: T = serde_json::from_str(&body)?;
        record.apply_patch(patch);

        tx.execute(
            "UPDATE records SET body = ?1 WHERE collection = ?2 AND id = ?3;",
            params![serde_json::to_string(&record)?, T::COLLECTION, id],
        )?;
        tx.commit()?;

        Ok(record)
    }

    fn delete(&self, id: RecordId) -> RepoResult<T> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let body = select_body(&tx, T::COLLECTION, id)?.ok_or_else(|| not_found::<T>(id))?;
        let record: T = serde_json::from_str(&body)?;

        tx.execute(
            "DELETE FROM records WHERE collection = ?1 AND id = ?2;",
            params![T::COLLECTION, id],
        )?;
        tx.commit()?;

        Ok(record)
    }
}

fn select_body(
    conn: &Connection,
    collection: &str,
    id: RecordId,
) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT body FROM records WHERE collection = ?1 AND id = ?2;",
        params![collection, id],
        |row| row.get(0),
    )
    .optional()
}
