//! Service wiring for a configured application instance.
//!
//! # Responsibility
//! - Build the three collection services on the configured storage backend.
//! - Load seed data into each collection at startup.

use crate::config::{AppConfig, LatencyConfig, StorageBackend};
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::item::Item;
use crate::model::pickup::Pickup;
use crate::model::storage_plan::StoragePlan;
use crate::model::Record;
use crate::repo::sqlite::SharedConnection;
use crate::repo::{DynRepository, InMemoryRepository, RepoError, SqliteRepository};
use crate::seed::{self, SeedError};
use crate::service::{CrudService, ItemService, PickupService, StoragePlanService};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
pub enum BootstrapError {
    Seed(SeedError),
    Repo(RepoError),
    Db(DbError),
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seed(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Seed(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<SeedError> for BootstrapError {
    fn from(value: SeedError) -> Self {
        Self::Seed(value)
    }
}

impl From<RepoError> for BootstrapError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for BootstrapError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// The three collection services of one application instance.
pub struct AppServices {
    pub items: ItemService<DynRepository<Item>>,
    pub pickups: PickupService<DynRepository<Pickup>>,
    pub storage_plans: StoragePlanService<DynRepository<StoragePlan>>,
}

impl AppServices {
    /// Builds seeded services on the backend named by `config.storage`.
    pub fn from_config(config: &AppConfig) -> Result<Self, BootstrapError> {
        match &config.storage {
            StorageBackend::Memory => Self::in_memory(&config.latency),
            StorageBackend::Sqlite { path } => {
                let conn = match path {
                    Some(path) => open_db(path)?,
                    None => open_db_in_memory()?,
                };
                Self::sqlite(Arc::new(Mutex::new(conn)), &config.latency)
            }
        }
    }

    pub fn in_memory(latency: &LatencyConfig) -> Result<Self, BootstrapError> {
        let services = Self {
            items: CrudService::new(memory_repo(seed::items()?)?, latency.items),
            pickups: CrudService::new(memory_repo(seed::pickups()?)?, latency.pickups),
            storage_plans: CrudService::new(
                memory_repo(seed::storage_plans()?)?,
                latency.storage_plans,
            ),
        };
        info!("event=app_bootstrap module=app status=ok backend=memory");
        Ok(services)
    }

    /// Services sharing one migrated SQLite connection.
    ///
    /// Seed data is only inserted into collections that have no rows, so a
    /// file-backed store keeps earlier changes across restarts.
    pub fn sqlite(conn: SharedConnection, latency: &LatencyConfig) -> Result<Self, BootstrapError> {
        let services = Self {
            items: CrudService::new(sqlite_repo(&conn, seed::items()?)?, latency.items),
            pickups: CrudService::new(sqlite_repo(&conn, seed::pickups()?)?, latency.pickups),
            storage_plans: CrudService::new(
                sqlite_repo(&conn, seed::storage_plans()?)?,
                latency.storage_plans,
            ),
        };
        info!("event=app_bootstrap module=app status=ok backend=sqlite");
        Ok(services)
    }
}

fn memory_repo<T: Record>(records: Vec<T>) -> Result<DynRepository<T>, BootstrapError> {
    Ok(Box::new(InMemoryRepository::with_records(records)?))
}

fn sqlite_repo<T: Record>(
    conn: &SharedConnection,
    records: Vec<T>,
) -> Result<DynRepository<T>, BootstrapError> {
    let repo = SqliteRepository::new(Arc::clone(conn));
    repo.seed_if_empty(records)?;
    Ok(Box::new(repo))
}
