//! Core domain logic for Stowage, a storage and pickup manager.
//!
//! Collection services (items, pickups, storage plans) sit on an injected
//! repository; page view models consume them.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod view;

pub use app::{AppServices, BootstrapError};
pub use config::{AppConfig, ConfigError, LatencyConfig, OperationLatency, StorageBackend};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status};
pub use model::item::{Dimensions, Item, ItemPatch, ItemStatus, NewItem};
pub use model::pickup::{NewPickup, Pickup, PickupPatch, PickupStatus, TimeSlot};
pub use model::storage_plan::{NewStoragePlan, PlanSize, StoragePlan, StoragePlanPatch};
pub use model::{Record, RecordId, FIRST_RECORD_ID};
pub use repo::{DynRepository, InMemoryRepository, RepoError, RepoResult, Repository, SqliteRepository};
pub use service::{
    CrudService, ItemService, PickupService, ServiceError, ServiceResult, StoragePlanService,
};
pub use view::{LoadState, Notice, NoticeKind};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
