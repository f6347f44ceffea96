//! Process-local repository over a locked `Vec`.

use super::{id_space_exhausted, not_found, RepoError, RepoResult, Repository};
use crate::model::{next_record_id, Record, RecordId};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory collection. Records keep insertion order.
#[derive(Debug)]
pub struct InMemoryRepository<T: Record> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Builds a repository preloaded with `records`.
    ///
    /// # Errors
    /// - `RepoError::DuplicateId` when two records share an id.
    pub fn with_records(records: Vec<T>) -> RepoResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(RepoError::DuplicateId {
                    collection: T::COLLECTION,
                    id: record.id(),
                });
            }
        }
        Ok(Self {
            records: RwLock::new(records),
        })
    }

    pub fn len(&self) -> RepoResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, Vec<T>>> {
        self.records
            .read()
            .map_err(|_| RepoError::Poisoned(T::COLLECTION))
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.records
            .write()
            .map_err(|_| RepoError::Poisoned(T::COLLECTION))
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn list(&self) -> RepoResult<Vec<T>> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<T>> {
        Ok(self.read()?.iter().find(|record| record.id() == id).cloned())
    }

    fn create(&self, draft: T::Draft, created_on: NaiveDate) -> RepoResult<T> {
        let mut records = self.write()?;
        let id = next_record_id(records.iter()).ok_or_else(id_space_exhausted::<T>)?;
        let record = T::from_draft(id, draft, created_on);
        records.push(record.clone());
        Ok(record)
    }

    fn update(&self, id: RecordId, patch: &T::Patch) -> RepoResult<T> {
        let mut records = self.write()?;
        let record = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        record.apply_patch(patch);
        Ok(record.clone())
    }

    fn delete(&self, id: RecordId) -> RepoResult<T> {
        let mut records = self.write()?;
        let index = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        Ok(records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::storage_plan::{NewStoragePlan, PlanSize, StoragePlan, StoragePlanPatch};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn plan(id: RecordId) -> StoragePlan {
        StoragePlan {
            id,
            name: format!("Plan {id}"),
            size: PlanSize::Small,
            monthly_price: 10.0,
            features: Vec::new(),
        }
    }

    fn draft(name: &str) -> NewStoragePlan {
        NewStoragePlan {
            name: name.to_string(),
            size: PlanSize::Large,
            monthly_price: 99.0,
            features: vec!["Climate control".to_string()],
        }
    }

    #[test]
    fn first_create_in_empty_collection_gets_id_one() {
        let repo = InMemoryRepository::<StoragePlan>::new();
        let created = repo.create(draft("Starter"), today()).unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[test]
    fn create_uses_max_id_not_length() {
        let repo = InMemoryRepository::with_records(vec![plan(2), plan(9), plan(5)]).unwrap();
        let created = repo.create(draft("Vault"), today()).unwrap();
        assert_eq!(created.id, 10);
    }

    #[test]
    fn create_after_max_id_reports_exhausted_ids() {
        let repo = InMemoryRepository::with_records(vec![plan(1), plan(RecordId::MAX)]).unwrap();
        let err = repo.create(draft("Overflow"), today()).unwrap_err();

        assert!(matches!(err, RepoError::IdSpaceExhausted("storage_plans")));
        assert_eq!(repo.len().unwrap(), 2);
    }

    #[test]
    fn duplicate_seed_ids_are_rejected() {
        let err = InMemoryRepository::with_records(vec![plan(1), plan(1)]).unwrap_err();
        assert!(matches!(
            err,
            RepoError::DuplicateId {
                collection: "storage_plans",
                id: 1
            }
        ));
    }

    #[test]
    fn delete_keeps_remaining_order() {
        let repo = InMemoryRepository::with_records(vec![plan(1), plan(2), plan(3)]).unwrap();
        let removed = repo.delete(2).unwrap();
        assert_eq!(removed.id, 2);

        let ids: Vec<_> = repo.list().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn missing_ids_report_not_found() {
        let repo = InMemoryRepository::with_records(vec![plan(1)]).unwrap();
        assert!(repo.get(42).unwrap().is_none());
        assert!(matches!(
            repo.update(42, &StoragePlanPatch::default()),
            Err(RepoError::NotFound { id: 42, .. })
        ));
        assert!(matches!(
            repo.delete(42),
            Err(RepoError::NotFound { id: 42, .. })
        ));
    }
}
