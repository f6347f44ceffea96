//! Asynchronous data-access services consumed by the page view models.
//!
//! # Responsibility
//! - Expose `get_all`/`get_by_id`/`create`/`update`/`delete` per collection.
//! - Suspend every call for its configured artificial delay before touching
//!   storage.
//! - Translate repository misses into `ServiceError::NotFound`.
//!
//! # Invariants
//! - The delay runs before the repository call; no lock is held across it.
//! - Returned records are owned copies; callers never alias stored state.

use crate::config::OperationLatency;
use crate::model::{Record, RecordId};
use crate::repo::{RepoError, Repository};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::time::Duration;

pub mod item_service;
pub mod pickup_service;
pub mod storage_plan_service;

pub use item_service::ItemService;
pub use pickup_service::PickupService;
pub use storage_plan_service::StoragePlanService;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// No record with `id` exists in the entity's collection.
    NotFound { entity: &'static str, id: RecordId },
    /// Storage failure other than a missing record.
    Repo(RepoError),
}

impl ServiceError {
    fn from_repo<T: Record>(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { id, .. } => Self::not_found::<T>(id),
            other => Self::Repo(other),
        }
    }

    fn not_found<T: Record>(id: RecordId) -> Self {
        Self::NotFound {
            entity: T::ENTITY,
            id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

/// CRUD service over one collection with simulated network latency.
pub struct CrudService<T: Record, R: Repository<T>> {
    repo: R,
    latency: OperationLatency,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record, R: Repository<T>> CrudService<T, R> {
    pub fn new(repo: R, latency: OperationLatency) -> Self {
        Self {
            repo,
            latency,
            _record: PhantomData,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn latency(&self) -> OperationLatency {
        self.latency
    }

    /// Returns every record in collection order.
    pub async fn get_all(&self) -> ServiceResult<Vec<T>> {
        simulate_latency(self.latency.get_all()).await;
        let result = self.repo.list();
        self.finish("get_all", None, result)
    }

    /// # Errors
    /// - `ServiceError::NotFound` when no record has `id`.
    pub async fn get_by_id(&self, id: RecordId) -> ServiceResult<T> {
        simulate_latency(self.latency.get_by_id()).await;
        let result = self
            .repo
            .get(id)
            .and_then(|found| found.ok_or_else(|| crate::repo::not_found::<T>(id)));
        self.finish("get_by_id", Some(id), result)
    }

    /// Stores a new record with the next free id and returns it.
    pub async fn create(&self, draft: T::Draft) -> ServiceResult<T> {
        simulate_latency(self.latency.create()).await;
        let created_on = chrono::Local::now().date_naive();
        let result = self.repo.create(draft, created_on);
        let id = result.as_ref().ok().map(T::id);
        self.finish("create", id, result)
    }

    /// Overwrites the fields present in `patch`.
    ///
    /// # Errors
    /// - `ServiceError::NotFound` when no record has `id`.
    pub async fn update(&self, id: RecordId, patch: T::Patch) -> ServiceResult<T> {
        simulate_latency(self.latency.update()).await;
        let result = self.repo.update(id, &patch);
        self.finish("update", Some(id), result)
    }

    /// Removes the record and returns its last stored state.
    ///
    /// # Errors
    /// - `ServiceError::NotFound` when no record has `id`.
    pub async fn delete(&self, id: RecordId) -> ServiceResult<T> {
        simulate_latency(self.latency.delete()).await;
        let result = self.repo.delete(id);
        self.finish("delete", Some(id), result)
    }

    fn finish<V>(
        &self,
        op: &'static str,
        id: Option<RecordId>,
        result: Result<V, RepoError>,
    ) -> ServiceResult<V> {
        let id = id.map_or_else(|| "-".to_string(), |id| id.to_string());
        match result {
            Ok(value) => {
                debug!(
                    "event=service_call module=service collection={} op={op} id={id} status=ok",
                    T::COLLECTION
                );
                Ok(value)
            }
            Err(err) => {
                let err = ServiceError::from_repo::<T>(err);
                warn!(
                    "event=service_call module=service collection={} op={op} id={id} status=error error={err}",
                    T::COLLECTION
                );
                Err(err)
            }
        }
    }
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
