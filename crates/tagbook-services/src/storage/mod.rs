// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Document storage.

Services talk to a [`Repository`] per record type. Two backends exist:
MongoDB (feature `mongo`) and an in-process memory store.
*/

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;
use tagbook_config::{StorageBackendKind, StorageConfig};

use crate::types::{Feature, MetaTag, ServiceError, ServiceResult};

pub mod memory;
#[cfg(feature = "mongo")]
pub mod mongo;

pub use memory::MemoryRepository;
#[cfg(feature = "mongo")]
pub use mongo::MongoRepository;

/// A document kind stored in its own collection with one unique key
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + Unpin + 'static {
    /// Collection name
    const COLLECTION: &'static str;
    /// Human name used in messages ("Meta tag")
    const RESOURCE: &'static str;
    /// Field holding the unique key
    const UNIQUE_FIELD: &'static str;

    fn id(&self) -> &str;
    fn unique_key(&self) -> &str;

    /// Natural listing order, as a MongoDB sort document
    fn sort_spec() -> bson::Document;

    /// Natural listing order, for backends that sort in process
    fn sort_cmp(a: &Self, b: &Self) -> Ordering;
}

impl Record for MetaTag {
    const COLLECTION: &'static str = "metatags";
    const RESOURCE: &'static str = "Meta tag";
    const UNIQUE_FIELD: &'static str = "name";

    fn id(&self) -> &str {
        &self.id
    }

    fn unique_key(&self) -> &str {
        &self.name
    }

    fn sort_spec() -> bson::Document {
        bson::doc! { "category": 1, "name": 1 }
    }

    // Category compares as stored text, same as the database sort.
    fn sort_cmp(a: &Self, b: &Self) -> Ordering {
        a.category
            .as_str()
            .cmp(b.category.as_str())
            .then_with(|| a.name.cmp(&b.name))
    }
}

impl Record for Feature {
    const COLLECTION: &'static str = "features";
    const RESOURCE: &'static str = "Feature";
    const UNIQUE_FIELD: &'static str = "title";

    fn id(&self) -> &str {
        &self.id
    }

    fn unique_key(&self) -> &str {
        &self.title
    }

    fn sort_spec() -> bson::Document {
        bson::doc! { "order": 1 }
    }

    fn sort_cmp(a: &Self, b: &Self) -> Ordering {
        a.order.cmp(&b.order)
    }
}

/// Single-collection document store
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// All records in natural order
    async fn find_all(&self) -> ServiceResult<Vec<T>>;

    async fn find_by_id(&self, id: &str) -> ServiceResult<Option<T>>;

    async fn find_by_unique_key(&self, key: &str) -> ServiceResult<Option<T>>;

    /// Insert a new record
    ///
    /// # Errors
    /// `AlreadyExists` when the unique key is taken
    async fn insert(&self, record: T) -> ServiceResult<T>;

    /// Replace the record with the same id
    ///
    /// # Errors
    /// `NotFound` when no record has that id, `AlreadyExists` when the new
    /// unique key belongs to another record
    async fn replace(&self, record: T) -> ServiceResult<T>;

    /// Delete by id; returns whether a record was removed
    async fn delete(&self, id: &str) -> ServiceResult<bool>;

    /// Delete every record; returns the number removed
    async fn delete_all(&self) -> ServiceResult<u64>;

    /// Check that the backend is reachable
    async fn ping(&self) -> ServiceResult<()>;
}

/// Repositories for both collections, sharing one backend
#[derive(Clone)]
pub struct Storage {
    pub kind: StorageBackendKind,
    pub meta_tags: Arc<dyn Repository<MetaTag>>,
    pub features: Arc<dyn Repository<Feature>>,
}

impl Storage {
    /// Empty in-memory storage
    pub fn memory() -> Self {
        Self {
            kind: StorageBackendKind::Memory,
            meta_tags: Arc::new(MemoryRepository::<MetaTag>::new()),
            features: Arc::new(MemoryRepository::<Feature>::new()),
        }
    }

    /// Open the backend named in the configuration
    pub async fn connect(config: &StorageConfig) -> ServiceResult<Self> {
        match config.backend {
            StorageBackendKind::Memory => {
                tracing::info!(target: "tagbook-services", "Using in-memory storage");
                Ok(Self::memory())
            }
            #[cfg(feature = "mongo")]
            StorageBackendKind::Mongo => {
                let database = mongo::connect(&config.mongodb_uri, &config.database).await?;
                let meta_tags = MongoRepository::<MetaTag>::open(&database).await?;
                let features = MongoRepository::<Feature>::open(&database).await?;
                tracing::info!(
                    target: "tagbook-services",
                    "Connected to MongoDB database '{}'",
                    config.database
                );
                Ok(Self {
                    kind: StorageBackendKind::Mongo,
                    meta_tags: Arc::new(meta_tags),
                    features: Arc::new(features),
                })
            }
            #[cfg(not(feature = "mongo"))]
            StorageBackendKind::Mongo => Err(ServiceError::Unavailable(
                "MongoDB storage requires the `mongo` feature".to_string(),
            )),
        }
    }

    /// Ping both collections' backend
    pub async fn ping(&self) -> ServiceResult<()> {
        self.meta_tags.ping().await?;
        self.features.ping().await
    }
}

/// Sort in natural order; stable, so ties keep insertion order
pub(crate) fn sort_records<T: Record>(records: &mut [T]) {
    records.sort_by(T::sort_cmp);
}

pub(crate) fn duplicate<T: Record>(key: &str) -> ServiceError {
    ServiceError::already_exists(T::RESOURCE, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{new_record_id, MetaTagCategory};
    use chrono::Utc;

    fn tag(name: &str, category: MetaTagCategory) -> MetaTag {
        let now = Utc::now();
        MetaTag {
            id: new_record_id(),
            name: name.into(),
            description: "d".into(),
            syntax: format!("[{}]", name),
            examples: vec![],
            category,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_meta_tag_sort_by_category_text_then_name() {
        let mut tags = vec![
            tag("Verse", MetaTagCategory::Structure),
            tag("Bridge", MetaTagCategory::Structure),
            tag("Tempo", MetaTagCategory::Other),
            tag("Genre", MetaTagCategory::Genre),
        ];
        sort_records(&mut tags);
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Genre", "Tempo", "Bridge", "Verse"]);
    }

    #[tokio::test]
    async fn test_memory_storage_pings() {
        let storage = Storage::memory();
        assert_eq!(storage.kind, StorageBackendKind::Memory);
        storage.ping().await.unwrap();
    }
}
