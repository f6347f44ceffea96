//! Pickup appointment record.

use super::{merge_field, Record, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PickupStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl PickupStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl Display for PickupStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four bookable pickup windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "9:00 AM - 12:00 PM")]
    Morning,
    #[serde(rename = "12:00 PM - 3:00 PM")]
    Midday,
    #[serde(rename = "3:00 PM - 6:00 PM")]
    Afternoon,
    #[serde(rename = "6:00 PM - 9:00 PM")]
    Evening,
}

impl TimeSlot {
    /// All slots in booking-form order.
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Midday,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Morning => "9:00 AM - 12:00 PM",
            Self::Midday => "12:00 PM - 3:00 PM",
            Self::Afternoon => "3:00 PM - 6:00 PM",
            Self::Evening => "6:00 PM - 9:00 PM",
        }
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    /// Accepts the full label or the lowercase slot name (`morning`, ...).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Some(slot) = Self::ALL.iter().find(|slot| slot.label() == trimmed) {
            return Ok(*slot);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "midday" => Ok(Self::Midday),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            other => Err(format!("unknown time slot `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickup {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub scheduled_date: NaiveDate,
    pub time_slot: TimeSlot,
    pub address: String,
    #[serde(default)]
    pub notes: String,
    pub status: PickupStatus,
    /// Ids of the items collected by this pickup.
    #[serde(default)]
    pub items: Vec<RecordId>,
}

impl Pickup {
    /// Only appointments that have not started can be cancelled.
    pub fn is_cancellable(&self) -> bool {
        self.status == PickupStatus::Scheduled
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPickup {
    pub scheduled_date: NaiveDate,
    pub time_slot: TimeSlot,
    pub address: String,
    #[serde(default)]
    pub notes: String,
    pub status: PickupStatus,
    #[serde(default)]
    pub items: Vec<RecordId>,
}

impl NewPickup {
    /// A fresh scheduled appointment with no items attached yet.
    pub fn scheduled(
        scheduled_date: NaiveDate,
        time_slot: TimeSlot,
        address: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            scheduled_date,
            time_slot,
            address: address.into(),
            notes: notes.into(),
            status: PickupStatus::Scheduled,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickupPatch {
    pub scheduled_date: Option<NaiveDate>,
    pub time_slot: Option<TimeSlot>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub status: Option<PickupStatus>,
    pub items: Option<Vec<RecordId>>,
}

impl Record for Pickup {
    type Draft = NewPickup;
    type Patch = PickupPatch;

    const COLLECTION: &'static str = "pickups";
    const ENTITY: &'static str = "Pickup";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewPickup, _created_on: NaiveDate) -> Self {
        Self {
            id,
            scheduled_date: draft.scheduled_date,
            time_slot: draft.time_slot,
            address: draft.address,
            notes: draft.notes,
            status: draft.status,
            items: draft.items,
        }
    }

    fn apply_patch(&mut self, patch: &PickupPatch) {
        merge_field(&mut self.scheduled_date, &patch.scheduled_date);
        merge_field(&mut self.time_slot, &patch.time_slot);
        merge_field(&mut self.address, &patch.address);
        merge_field(&mut self.notes, &patch.notes);
        merge_field(&mut self.status, &patch.status);
        merge_field(&mut self.items, &patch.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_slot_round_trips_through_its_label() {
        for slot in TimeSlot::ALL {
            let json = serde_json::to_string(&slot).unwrap();
            assert_eq!(json, format!("\"{}\"", slot.label()));
            assert_eq!(slot.label().parse::<TimeSlot>().unwrap(), slot);
        }
    }

    #[test]
    fn time_slot_parses_short_names() {
        assert_eq!("Evening".parse::<TimeSlot>().unwrap(), TimeSlot::Evening);
        assert!("noon".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn only_scheduled_pickups_are_cancellable() {
        let mut pickup = Pickup::from_draft(
            1,
            NewPickup::scheduled(
                NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                TimeSlot::Morning,
                "1 Elm St",
                "",
            ),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );
        assert!(pickup.is_cancellable());

        pickup.apply_patch(&PickupPatch {
            status: Some(PickupStatus::InProgress),
            ..PickupPatch::default()
        });
        assert!(!pickup.is_cancellable());
        assert_eq!(pickup.address, "1 Elm St");
    }
}
