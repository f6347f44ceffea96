//! Typed records for the three storage collections.
//!
//! # Responsibility
//! - Define the item, pickup and storage plan records plus their create
//!   (draft) and partial update (patch) inputs.
//! - Describe how a collection assigns identities and merges patches.
//!
//! # Invariants
//! - `Id` is unique within one collection.
//! - A new record gets `max(existing Ids) + 1`, or `FIRST_RECORD_ID` when
//!   the collection is empty.
//! - Patches are shallow: a present field replaces the stored value whole.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod item;
pub mod pickup;
pub mod storage_plan;

/// Integer identity shared by every collection.
pub type RecordId = i64;

/// Identity assigned to the first record of an empty collection.
pub const FIRST_RECORD_ID: RecordId = 1;

/// Behavior every stored record type provides to repositories and services.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Caller-supplied fields for `create`.
    type Draft: Send;
    /// Partial update applied by `update`.
    type Patch: Send + Sync;

    /// Stable collection key used by storage backends and log events.
    const COLLECTION: &'static str;
    /// Human-readable entity name used in error messages.
    const ENTITY: &'static str;

    fn id(&self) -> RecordId;

    /// Builds the stored record from a draft once its identity is known.
    ///
    /// `created_on` is the local calendar date of the create call; record
    /// types that do not track a creation date ignore it.
    fn from_draft(id: RecordId, draft: Self::Draft, created_on: NaiveDate) -> Self;

    /// Overwrites the fields present in `patch`, leaving the rest unchanged.
    fn apply_patch(&mut self, patch: &Self::Patch);
}

/// Returns the identity the next created record receives.
///
/// `None` when the largest stored id is already `RecordId::MAX`.
pub fn next_record_id<'a, T: Record>(
    records: impl IntoIterator<Item = &'a T>,
) -> Option<RecordId> {
    successor_id(records.into_iter().map(T::id).max())
}

/// Identity following `max`, or `FIRST_RECORD_ID` for an empty collection.
pub fn successor_id(max: Option<RecordId>) -> Option<RecordId> {
    match max {
        Some(max) => max.checked_add(1),
        None => Some(FIRST_RECORD_ID),
    }
}

/// Replaces `slot` with a clone of `value` when the patch carries one.
pub(crate) fn merge_field<V: Clone>(slot: &mut V, value: &Option<V>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

/// Same as [`merge_field`] for record fields that are themselves optional.
pub(crate) fn merge_optional_field<V: Clone>(slot: &mut Option<V>, value: &Option<V>) {
    if let Some(value) = value {
        *slot = Some(value.clone());
    }
}
