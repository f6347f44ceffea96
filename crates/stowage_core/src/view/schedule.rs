//! Pickup scheduling page: booking form, appointment list, cancellation.

use super::{load, LoadState, Notice};
use crate::model::pickup::{NewPickup, Pickup, TimeSlot};
use crate::model::RecordId;
use crate::repo::Repository;
use crate::service::PickupService;
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const PICKUPS_LOAD_FAILED: &str = "Failed to load pickups";
pub const PICKUP_SCHEDULED: &str = "Pickup scheduled successfully!";
pub const PICKUP_SCHEDULE_FAILED: &str = "Failed to schedule pickup";

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Raw values of the booking form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickupForm {
    pub scheduled_date: String,
    pub time_slot: String,
    pub address: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    MissingDate,
    InvalidDate(String),
    MissingTimeSlot,
    UnknownTimeSlot(String),
    MissingAddress,
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDate => f.write_str("pickup date is required"),
            Self::InvalidDate(value) => write!(f, "pickup date `{value}` is not YYYY-MM-DD"),
            Self::MissingTimeSlot => f.write_str("time slot is required"),
            Self::UnknownTimeSlot(value) => write!(f, "unknown time slot `{value}`"),
            Self::MissingAddress => f.write_str("pickup address is required"),
        }
    }
}

impl Error for FormError {}

impl PickupForm {
    /// Checks required fields and builds a scheduled pickup with no items.
    pub fn validate(&self) -> Result<NewPickup, FormError> {
        let date = self.scheduled_date.trim();
        if date.is_empty() {
            return Err(FormError::MissingDate);
        }
        let scheduled_date = NaiveDate::parse_from_str(date, DATE_INPUT_FORMAT)
            .map_err(|_| FormError::InvalidDate(date.to_string()))?;

        let slot = self.time_slot.trim();
        if slot.is_empty() {
            return Err(FormError::MissingTimeSlot);
        }
        let time_slot: TimeSlot = slot
            .parse()
            .map_err(|_| FormError::UnknownTimeSlot(slot.to_string()))?;

        let address = self.address.trim();
        if address.is_empty() {
            return Err(FormError::MissingAddress);
        }

        Ok(NewPickup::scheduled(
            scheduled_date,
            time_slot,
            address,
            self.notes.trim(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Scheduled { pickup: Pickup, notice: Notice },
    /// Form input was incomplete; nothing was sent.
    Rejected(FormError),
    Failed(Notice),
}

pub async fn submit_pickup<R: Repository<Pickup>>(
    service: &PickupService<R>,
    form: &PickupForm,
) -> SubmitOutcome {
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(err) => return SubmitOutcome::Rejected(err),
    };

    match service.create(draft).await {
        Ok(pickup) => {
            info!(
                "event=pickup_scheduled module=view status=ok id={} date={} slot={}",
                pickup.id, pickup.scheduled_date, pickup.time_slot
            );
            SubmitOutcome::Scheduled {
                pickup,
                notice: Notice::success(PICKUP_SCHEDULED),
            }
        }
        Err(_) => SubmitOutcome::Failed(Notice::error(PICKUP_SCHEDULE_FAILED)),
    }
}

pub async fn load_pickups<R: Repository<Pickup>>(
    service: &PickupService<R>,
) -> LoadState<Vec<Pickup>> {
    load("schedule", PICKUPS_LOAD_FAILED, service.get_all()).await
}

/// Cancels an appointment that has not started yet by removing it.
pub async fn cancel_pickup<R: Repository<Pickup>>(
    service: &PickupService<R>,
    id: RecordId,
) -> Notice {
    let pickup = match service.get_by_id(id).await {
        Ok(pickup) => pickup,
        Err(_) => return Notice::error("Failed to cancel pickup"),
    };
    if !pickup.is_cancellable() {
        return Notice::error(format!(
            "Pickup is {} and can no longer be cancelled",
            pickup.status
        ));
    }
    match service.delete(id).await {
        Ok(_) => Notice::success("Pickup cancelled"),
        Err(_) => Notice::error("Failed to cancel pickup"),
    }
}

/// Long form date heading, e.g. `Saturday, July 20, 2024`.
pub fn pickup_date_heading(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
