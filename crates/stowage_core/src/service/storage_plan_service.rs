//! Storage plan catalogue service.

use super::CrudService;
use crate::app::BootstrapError;
use crate::config::OperationLatency;
use crate::model::storage_plan::StoragePlan;
use crate::repo::InMemoryRepository;
use crate::seed;

pub type StoragePlanService<R = InMemoryRepository<StoragePlan>> = CrudService<StoragePlan, R>;

impl StoragePlanService {
    /// In-memory service preloaded with the embedded dataset.
    pub fn seeded(latency: OperationLatency) -> Result<Self, BootstrapError> {
        let repo = InMemoryRepository::with_records(seed::storage_plans()?)?;
        Ok(Self::new(repo, latency))
    }
}
