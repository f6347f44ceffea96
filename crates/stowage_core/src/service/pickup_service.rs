//! Service over scheduled pickup appointments.

use super::CrudService;
use crate::app::BootstrapError;
use crate::config::OperationLatency;
use crate::model::pickup::Pickup;
use crate::repo::InMemoryRepository;
use crate::seed;

pub type PickupService<R = InMemoryRepository<Pickup>> = CrudService<Pickup, R>;

impl PickupService {
    /// In-memory service preloaded with the embedded dataset.
    pub fn seeded(latency: OperationLatency) -> Result<Self, BootstrapError> {
        let repo = InMemoryRepository::with_records(seed::pickups()?)?;
        Ok(Self::new(repo, latency))
    }
}
