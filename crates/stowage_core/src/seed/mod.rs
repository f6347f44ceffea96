//! Static datasets loaded once at startup.
//!
//! The JSON files are embedded at build time and use the same field names
//! as the serialized records.

use crate::model::item::Item;
use crate::model::pickup::Pickup;
use crate::model::storage_plan::StoragePlan;
use crate::model::Record;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};

const ITEMS_JSON: &str = include_str!("items.json");
const PICKUPS_JSON: &str = include_str!("pickups.json");
const STORAGE_PLANS_JSON: &str = include_str!("storage_plans.json");

#[derive(Debug)]
pub struct SeedError {
    pub collection: &'static str,
    pub source: serde_json::Error,
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {} seed data: {}", self.collection, self.source)
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

pub fn items() -> Result<Vec<Item>, SeedError> {
    parse(ITEMS_JSON)
}

pub fn pickups() -> Result<Vec<Pickup>, SeedError> {
    parse(PICKUPS_JSON)
}

pub fn storage_plans() -> Result<Vec<StoragePlan>, SeedError> {
    parse(STORAGE_PLANS_JSON)
}

fn parse<T: Record + DeserializeOwned>(raw: &str) -> Result<Vec<T>, SeedError> {
    serde_json::from_str(raw).map_err(|source| SeedError {
        collection: T::COLLECTION,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique_ids<T: Record>(records: &[T]) {
        let ids: HashSet<_> = records.iter().map(T::id).collect();
        assert_eq!(ids.len(), records.len(), "{} ids must be unique", T::COLLECTION);
    }

    #[test]
    fn embedded_datasets_parse_with_unique_ids() {
        let items = items().unwrap();
        let pickups = pickups().unwrap();
        let plans = storage_plans().unwrap();

        assert!(!items.is_empty());
        assert!(!pickups.is_empty());
        assert_eq!(plans.len(), 3);

        assert_unique_ids(&items);
        assert_unique_ids(&pickups);
        assert_unique_ids(&plans);
    }
}
