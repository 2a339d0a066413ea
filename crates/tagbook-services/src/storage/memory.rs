// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! In-process repository backed by a `RwLock<Vec<T>>`

use async_trait::async_trait;
use parking_lot::RwLock;
use std::marker::PhantomData;

use super::{duplicate, sort_records, Record, Repository};
use crate::types::{ServiceError, ServiceResult};

/// Memory repository; data lives as long as the process
pub struct MemoryRepository<T: Record> {
    records: RwLock<Vec<T>>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Record> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            _kind: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl<T: Record> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryRepository<T> {
    async fn find_all(&self) -> ServiceResult<Vec<T>> {
        let mut records = self.records.read().clone();
        sort_records(&mut records);
        Ok(records)
    }

    async fn find_by_id(&self, id: &str) -> ServiceResult<Option<T>> {
        Ok(self.records.read().iter().find(|r| r.id() == id).cloned())
    }

    async fn find_by_unique_key(&self, key: &str) -> ServiceResult<Option<T>> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|r| r.unique_key() == key)
            .cloned())
    }

    async fn insert(&self, record: T) -> ServiceResult<T> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.unique_key() == record.unique_key()) {
            return Err(duplicate::<T>(record.unique_key()));
        }
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(ServiceError::Storage(format!(
                "duplicate id {} in {}",
                record.id(),
                T::COLLECTION
            )));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn replace(&self, record: T) -> ServiceResult<T> {
        let mut records = self.records.write();
        if records
            .iter()
            .any(|r| r.id() != record.id() && r.unique_key() == record.unique_key())
        {
            return Err(duplicate::<T>(record.unique_key()));
        }
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| ServiceError::not_found(T::RESOURCE, record.id()))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: &str) -> ServiceResult<bool> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() != before)
    }

    async fn delete_all(&self) -> ServiceResult<u64> {
        let mut records = self.records.write();
        let removed = records.len() as u64;
        records.clear();
        Ok(removed)
    }

    async fn ping(&self) -> ServiceResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{new_record_id, Feature};
    use chrono::Utc;

    fn feature(title: &str, order: i64) -> Feature {
        let now = Utc::now();
        Feature {
            id: new_record_id(),
            title: title.into(),
            description: "d".into(),
            how_to_use: "h".into(),
            examples: vec![],
            image_url: String::new(),
            order,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_key() {
        let repo = MemoryRepository::<Feature>::new();
        repo.insert(feature("Custom Mode", 1)).await.unwrap();
        let err = repo.insert(feature("Custom Mode", 2)).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { .. }));
        assert_eq!(err.to_string(), "Feature already exists");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_sorted_by_order() {
        let repo = MemoryRepository::<Feature>::new();
        repo.insert(feature("c", 3)).await.unwrap();
        repo.insert(feature("a", 1)).await.unwrap();
        repo.insert(feature("b", 2)).await.unwrap();
        let titles: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_replace_checks_other_keys() {
        let repo = MemoryRepository::<Feature>::new();
        let first = repo.insert(feature("first", 0)).await.unwrap();
        repo.insert(feature("second", 0)).await.unwrap();

        // Keeping its own key is fine
        let mut same = first.clone();
        same.order = 5;
        assert_eq!(repo.replace(same).await.unwrap().order, 5);

        let mut renamed = first.clone();
        renamed.title = "second".into();
        assert!(matches!(
            repo.replace(renamed).await,
            Err(ServiceError::AlreadyExists { .. })
        ));

        let missing = feature("third", 0);
        assert!(matches!(
            repo.replace(missing).await,
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_and_delete_all() {
        let repo = MemoryRepository::<Feature>::new();
        let a = repo.insert(feature("a", 0)).await.unwrap();
        repo.insert(feature("b", 0)).await.unwrap();

        assert!(repo.delete(&a.id).await.unwrap());
        assert!(!repo.delete(&a.id).await.unwrap());
        assert!(repo.find_by_id(&a.id).await.unwrap().is_none());
        assert!(repo.find_by_unique_key("b").await.unwrap().is_some());

        assert_eq!(repo.delete_all().await.unwrap(), 1);
        assert!(repo.is_empty());
    }
}
