//! Dashboard: summary counts, recent items and upcoming pickups.

use super::{load, LoadState};
use crate::model::item::{Item, ItemStatus};
use crate::model::pickup::{Pickup, PickupStatus};
use crate::repo::Repository;
use crate::service::{ItemService, PickupService, ServiceError};

pub const RECENT_ITEM_LIMIT: usize = 4;
pub const UPCOMING_PICKUP_LIMIT: usize = 3;
pub const DASHBOARD_LOAD_FAILED: &str = "Failed to load dashboard data";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// First items in collection order.
    pub recent_items: Vec<Item>,
    /// First pickups that are still `scheduled`.
    pub upcoming_pickups: Vec<Pickup>,
    pub stored_count: usize,
    pub in_transit_count: usize,
}

impl DashboardSnapshot {
    pub fn from_collections(items: &[Item], pickups: &[Pickup]) -> Self {
        Self {
            recent_items: items.iter().take(RECENT_ITEM_LIMIT).cloned().collect(),
            upcoming_pickups: pickups
                .iter()
                .filter(|pickup| pickup.status == PickupStatus::Scheduled)
                .take(UPCOMING_PICKUP_LIMIT)
                .cloned()
                .collect(),
            stored_count: count_status(items, ItemStatus::Stored),
            in_transit_count: count_status(items, ItemStatus::InTransit),
        }
    }
}

fn count_status(items: &[Item], status: ItemStatus) -> usize {
    items.iter().filter(|item| item.status == status).count()
}

/// Fetches items and pickups concurrently; either failure fails the page.
pub async fn load_dashboard<RI, RP>(
    items: &ItemService<RI>,
    pickups: &PickupService<RP>,
) -> LoadState<DashboardSnapshot>
where
    RI: Repository<Item>,
    RP: Repository<Pickup>,
{
    load("dashboard", DASHBOARD_LOAD_FAILED, async {
        let (items, pickups) = tokio::join!(items.get_all(), pickups.get_all());
        Ok::<_, ServiceError>(DashboardSnapshot::from_collections(&items?, &pickups?))
    })
    .await
}
