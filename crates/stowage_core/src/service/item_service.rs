//! Service over stored items.
//!
//! `create` stamps the current date and `scheduled` status on every new item
//! (see `Item::from_draft`).

use super::CrudService;
use crate::app::BootstrapError;
use crate::config::OperationLatency;
use crate::model::item::Item;
use crate::repo::InMemoryRepository;
use crate::seed;

pub type ItemService<R = InMemoryRepository<Item>> = CrudService<Item, R>;

impl ItemService {
    /// In-memory service preloaded with the embedded dataset.
    pub fn seeded(latency: OperationLatency) -> Result<Self, BootstrapError> {
        let repo = InMemoryRepository::with_records(seed::items()?)?;
        Ok(Self::new(repo, latency))
    }
}
