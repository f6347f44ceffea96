//! Repository contracts and storage implementations.
//!
//! # Responsibility
//! - Define the storage-agnostic CRUD contract services depend on.
//! - Keep locking and SQL details out of the service layer.
//!
//! # Invariants
//! - Identity assignment and insertion happen in one critical section, so
//!   concurrent creates never share an id.
//! - `update`/`delete` on a missing id return `RepoError::NotFound`.

use crate::db::DbError;
use crate::model::{Record, RecordId};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use sqlite::SqliteRepository;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    NotFound {
        collection: &'static str,
        id: RecordId,
    },
    DuplicateId {
        collection: &'static str,
        id: RecordId,
    },
    /// The largest stored id leaves no room for another record.
    IdSpaceExhausted(&'static str),
    Db(DbError),
    Serialization(serde_json::Error),
    /// A writer panicked while holding the collection lock.
    Poisoned(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
            Self::DuplicateId { collection, id } => {
                write!(f, "duplicate id {id} in {collection} records")
            }
            Self::IdSpaceExhausted(collection) => {
                write!(f, "no record ids left in {collection} records")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "invalid stored record body: {err}"),
            Self::Poisoned(collection) => write!(f, "{collection} collection lock is poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Storage contract for one record collection.
pub trait Repository<T: Record>: Send + Sync {
    /// All records in insertion order.
    fn list(&self) -> RepoResult<Vec<T>>;
    fn get(&self, id: RecordId) -> RepoResult<Option<T>>;
    /// Assigns the next id, stores the record built from `draft`, returns it.
    fn create(&self, draft: T::Draft, created_on: NaiveDate) -> RepoResult<T>;
    /// Shallow-merges `patch` into the stored record and returns the result.
    fn update(&self, id: RecordId, patch: &T::Patch) -> RepoResult<T>;
    /// Removes the record and returns what was stored.
    fn delete(&self, id: RecordId) -> RepoResult<T>;
}

pub(crate) fn id_space_exhausted<T: Record>() -> RepoError {
    RepoError::IdSpaceExhausted(T::COLLECTION)
}

pub(crate) fn not_found<T: Record>(id: RecordId) -> RepoError {
    RepoError::NotFound {
        collection: T::COLLECTION,
        id,
    }
}

/// Repository chosen at runtime from configuration.
pub type DynRepository<T> = Box<dyn Repository<T>>;

impl<T: Record> Repository<T> for Box<dyn Repository<T>> {
    fn list(&self) -> RepoResult<Vec<T>> {
        (**self).list()
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<T>> {
        (**self).get(id)
    }

    fn create(&self, draft: T::Draft, created_on: NaiveDate) -> RepoResult<T> {
        (**self).create(draft, created_on)
    }

    fn update(&self, id: RecordId, patch: &T::Patch) -> RepoResult<T> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: RecordId) -> RepoResult<T> {
        (**self).delete(id)
    }
}
