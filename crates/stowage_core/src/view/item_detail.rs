//! Item detail page: photo gallery, facts and storage history.

use super::{load, LoadState, Notice};
use crate::model::item::{Dimensions, Item, ItemStatus};
use crate::model::RecordId;
use crate::repo::Repository;
use crate::service::ItemService;
use chrono::NaiveDate;
use log::warn;

pub const ITEM_DETAIL_LOAD_FAILED: &str = "Failed to load item details";

/// Badge style for an item status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Stored,
    Transit,
    Scheduled,
}

pub fn status_badge(status: ItemStatus) -> BadgeVariant {
    match status {
        ItemStatus::Stored => BadgeVariant::Stored,
        ItemStatus::InTransit => BadgeVariant::Transit,
        ItemStatus::Scheduled => BadgeVariant::Scheduled,
    }
}

/// `L" × W" × H"` in inches.
pub fn dimensions_label(dimensions: &Dimensions) -> String {
    format!(
        "{}\" × {}\" × {}\"",
        dimensions.length, dimensions.width, dimensions.height
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub title: &'static str,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetail {
    pub item: Item,
    selected_photo: usize,
}

impl ItemDetail {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            selected_photo: 0,
        }
    }

    pub fn selected_photo_index(&self) -> usize {
        self.selected_photo
    }

    /// Selects a gallery photo; out-of-range indexes are ignored.
    pub fn select_photo(&mut self, index: usize) -> bool {
        if index >= self.item.photo_count() {
            return false;
        }
        self.selected_photo = index;
        true
    }

    pub fn selected_photo(&self) -> Option<&str> {
        self.item
            .photos
            .as_deref()
            .and_then(|photos| photos.get(self.selected_photo))
            .map(String::as_str)
    }

    /// Thumbnails are only shown when there is more than one photo.
    pub fn shows_thumbnails(&self) -> bool {
        self.item.photo_count() > 1
    }

    pub fn dimensions_label(&self) -> Option<String> {
        self.item.dimensions.as_ref().map(dimensions_label)
    }

    pub fn badge(&self) -> BadgeVariant {
        status_badge(self.item.status)
    }

    pub fn storage_history(&self) -> Vec<HistoryEntry> {
        vec![
            HistoryEntry {
                title: "Item Stored",
                date: self.item.stored_date,
            },
            HistoryEntry {
                title: "Pickup Completed",
                date: self.item.stored_date,
            },
        ]
    }

    pub fn request_delivery(&self) -> Notice {
        super::item_grid::request_delivery(&self.item)
    }
}

/// Parses the `:id` route segment.
pub fn parse_item_id(raw: &str) -> Option<RecordId> {
    raw.trim().parse().ok()
}

/// Loads the page for the route segment `raw_id`.
///
/// A segment that is not an integer fails with the page message, the same
/// as a missing item.
pub async fn load_item_detail<R: Repository<Item>>(
    service: &ItemService<R>,
    raw_id: &str,
) -> LoadState<ItemDetail> {
    let Some(id) = parse_item_id(raw_id) else {
        warn!(
            "event=page_load module=view page=item_detail status=error error=invalid_route_id id={raw_id}"
        );
        return LoadState::failed(ITEM_DETAIL_LOAD_FAILED);
    };
    load("item_detail", ITEM_DETAIL_LOAD_FAILED, service.get_by_id(id))
        .await
        .map(ItemDetail::new)
}
