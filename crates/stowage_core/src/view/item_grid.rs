//! "My Items" grid with free-text search and category filter.
//!
//! # Invariants
//! - Search matches a case-insensitive substring of name or category.
//! - Category filter is case-insensitive equality on `category`.
//! - Both constraints apply together; an empty one matches everything.

use super::{load, LoadState, Notice};
use crate::model::item::Item;
use crate::repo::Repository;
use crate::service::ItemService;

pub const ITEMS_LOAD_FAILED: &str = "Failed to load items. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFilter {
    pub label: &'static str,
    pub value: &'static str,
}

pub const CATEGORY_FILTERS: [CategoryFilter; 6] = [
    CategoryFilter { label: "Furniture", value: "furniture" },
    CategoryFilter { label: "Electronics", value: "electronics" },
    CategoryFilter { label: "Clothing", value: "clothing" },
    CategoryFilter { label: "Documents", value: "documents" },
    CategoryFilter { label: "Seasonal", value: "seasonal" },
    CategoryFilter { label: "Sports", value: "sports" },
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub search: String,
    pub category: Option<String>,
}

impl ItemFilter {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.category.as_deref().is_some_and(|c| !c.is_empty())
    }

    pub fn matches(&self, item: &Item) -> bool {
        let search = self.search.to_lowercase();
        let matches_search = search.is_empty()
            || item.name.to_lowercase().contains(&search)
            || item.category.to_lowercase().contains(&search);

        let matches_category = match self.category.as_deref() {
            None | Some("") => true,
            Some(category) => item.category.to_lowercase() == category.to_lowercase(),
        };

        matches_search && matches_category
    }
}

pub fn filter_items(items: &[Item], filter: &ItemFilter) -> Vec<Item> {
    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}

/// Placeholder shown when the grid has nothing to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub description: &'static str,
    pub action_label: &'static str,
}

/// Grid page state: the loaded collection plus the active filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemGrid {
    pub items: LoadState<Vec<Item>>,
    pub filter: ItemFilter,
}

impl Default for ItemGrid {
    fn default() -> Self {
        Self {
            items: LoadState::Loading,
            filter: ItemFilter::default(),
        }
    }
}

impl ItemGrid {
    /// (Re)loads the collection, keeping the current filter.
    pub async fn load<R: Repository<Item>>(&mut self, service: &ItemService<R>) {
        self.items = load("items", ITEMS_LOAD_FAILED, service.get_all()).await;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_category(&mut self, category: Option<&str>) {
        self.filter.category = category.map(str::to_string);
    }

    /// Items passing the filter; empty until loaded.
    pub fn visible_items(&self) -> Vec<Item> {
        self.items
            .ready()
            .map(|items| filter_items(items, &self.filter))
            .unwrap_or_default()
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.items.ready().is_none() || !self.visible_items().is_empty() {
            return None;
        }
        let description = if self.filter.is_active() {
            "Try adjusting your search or filter criteria"
        } else {
            "Start by adding your first item to storage"
        };
        Some(EmptyState {
            title: "No items found",
            description,
            action_label: "Add First Item",
        })
    }
}

pub fn request_delivery(item: &Item) -> Notice {
    Notice::success(format!("Delivery request submitted for {}", item.name))
}

pub fn add_item_placeholder() -> Notice {
    Notice::info("Add item feature coming soon!")
}
