//! Stored item record.
//!
//! # Invariants
//! - A newly created item is always `ItemStatus::Scheduled` and carries the
//!   creation date as `stored_date`, whatever the draft says.
//! - `photos` keeps caller order; the first photo is the cover image.

use super::{merge_field, merge_optional_field, Record, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Where an item currently is in the storage lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    /// Sitting in a storage unit.
    Stored,
    /// On a truck, either way.
    InTransit,
    /// Waiting for its pickup appointment.
    Scheduled,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::InTransit => "in-transit",
            Self::Scheduled => "scheduled",
        }
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outer measurements in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub location: String,
    pub status: ItemStatus,
    pub stored_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Item {
    /// First photo, used as the card cover.
    pub fn cover_photo(&self) -> Option<&str> {
        self.photos
            .as_deref()
            .and_then(|photos| photos.first())
            .map(String::as_str)
    }

    pub fn photo_count(&self) -> usize {
        self.photos.as_ref().map_or(0, Vec::len)
    }
}

/// Fields a caller supplies when adding an item.
///
/// Status and stored date are not part of the draft: creation stamps them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub location: String,
    pub photos: Option<Vec<String>>,
    pub dimensions: Option<Dimensions>,
    pub notes: Option<String>,
}

impl NewItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial item update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub status: Option<ItemStatus>,
    pub stored_date: Option<NaiveDate>,
    pub photos: Option<Vec<String>>,
    pub dimensions: Option<Dimensions>,
    pub notes: Option<String>,
}

impl Record for Item {
    type Draft = NewItem;
    type Patch = ItemPatch;

    const COLLECTION: &'static str = "items";
    const ENTITY: &'static str = "Item";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewItem, created_on: NaiveDate) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            location: draft.location,
            status: ItemStatus::Scheduled,
            stored_date: created_on,
            photos: draft.photos,
            dimensions: draft.dimensions,
            notes: draft.notes,
        }
    }

    fn apply_patch(&mut self, patch: &ItemPatch) {
        merge_field(&mut self.name, &patch.name);
        merge_field(&mut self.category, &patch.category);
        merge_field(&mut self.location, &patch.location);
        merge_field(&mut self.status, &patch.status);
        merge_field(&mut self.stored_date, &patch.stored_date);
        merge_optional_field(&mut self.photos, &patch.photos);
        merge_optional_field(&mut self.dimensions, &patch.dimensions);
        merge_optional_field(&mut self.notes, &patch.notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Item {
        Item {
            id: 7,
            name: "Desk".to_string(),
            category: "Furniture".to_string(),
            location: "Unit A-12".to_string(),
            status: ItemStatus::Stored,
            stored_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            photos: None,
            dimensions: Some(Dimensions {
                length: 48.0,
                width: 24.0,
                height: 30.0,
            }),
            notes: None,
        }
    }

    #[test]
    fn from_draft_forces_scheduled_status_and_creation_date() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let item = Item::from_draft(4, NewItem::named("Box"), today);

        assert_eq!(item.id, 4);
        assert_eq!(item.name, "Box");
        assert_eq!(item.status, ItemStatus::Scheduled);
        assert_eq!(item.stored_date, today);
    }

    #[test]
    fn patch_replaces_dimensions_wholesale() {
        let mut item = sample();
        item.apply_patch(&ItemPatch {
            dimensions: Some(Dimensions {
                length: 10.0,
                width: 0.0,
                height: 0.0,
            }),
            ..ItemPatch::default()
        });

        let dimensions = item.dimensions.unwrap();
        assert_eq!(dimensions.length, 10.0);
        assert_eq!(dimensions.width, 0.0);
        assert_eq!(item.name, "Desk");
    }

    #[test]
    fn serializes_with_seed_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["Id"], 7);
        assert_eq!(json["storedDate"], "2024-01-15");
        assert_eq!(json["status"], "stored");
        assert!(json.get("photos").is_none());
    }

    #[test]
    fn status_uses_kebab_case() {
        let status: ItemStatus = serde_json::from_str("\"in-transit\"").unwrap();
        assert_eq!(status, ItemStatus::InTransit);
        assert_eq!(status.to_string(), "in-transit");
    }
}
