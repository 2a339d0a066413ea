// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! MongoDB repository
//!
//! Documents keep the Mongoose layout: an ObjectId `_id`, BSON dates for
//! `createdAt`/`updatedAt`, and extra fields such as `__v` are ignored.
//! Each collection carries a unique index on the record's unique field.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use bson::{doc, Document};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{duplicate, Record, Repository};
use crate::types::content::lenient_i64;
use crate::types::{Example, Feature, MetaTag, MetaTagCategory, ServiceError, ServiceResult};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Connect and return the named database handle
pub async fn connect(uri: &str, database: &str) -> ServiceResult<Database> {
    let client = Client::with_uri_str(uri).await?;
    let db = client.database(database);
    db.run_command(doc! { "ping": 1 }, None).await?;
    Ok(db)
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        _ => false,
    }
}

/// `_id` filter, or `None` when `id` is not an ObjectId
fn id_filter(id: &str) -> Option<Document> {
    ObjectId::parse_str(id).ok().map(|oid| doc! { "_id": oid })
}

fn object_id(id: &str) -> ServiceResult<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|e| ServiceError::Internal(format!("record id '{}' is not an ObjectId: {}", id, e)))
}

/// A record with its own BSON document shape
pub trait MongoRecord: Record {
    type Stored: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static;

    fn to_stored(&self) -> ServiceResult<Self::Stored>;
    fn from_stored(stored: Self::Stored) -> Self;
}

/// `metatags` document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTagDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub syntax: String,
    #[serde(default)]
    pub examples: Vec<Example>,
    pub category: MetaTagCategory,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl MongoRecord for MetaTag {
    type Stored = MetaTagDocument;

    fn to_stored(&self) -> ServiceResult<MetaTagDocument> {
        Ok(MetaTagDocument {
            id: object_id(&self.id)?,
            name: self.name.clone(),
            description: self.description.clone(),
            syntax: self.syntax.clone(),
            examples: self.examples.clone(),
            category: self.category,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    fn from_stored(stored: MetaTagDocument) -> Self {
        MetaTag {
            id: stored.id.to_hex(),
            name: stored.name,
            description: stored.description,
            syntax: stored.syntax,
            examples: stored.examples,
            category: stored.category,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

/// `features` document; `order` may have been written as a double
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub how_to_use: String,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub order: i64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl MongoRecord for Feature {
    type Stored = FeatureDocument;

    fn to_stored(&self) -> ServiceResult<FeatureDocument> {
        Ok(FeatureDocument {
            id: object_id(&self.id)?,
            title: self.title.clone(),
            description: self.description.clone(),
            how_to_use: self.how_to_use.clone(),
            examples: self.examples.clone(),
            image_url: self.image_url.clone(),
            order: self.order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    fn from_stored(stored: FeatureDocument) -> Self {
        Feature {
            id: stored.id.to_hex(),
            title: stored.title,
            description: stored.description,
            how_to_use: stored.how_to_use,
            examples: stored.examples,
            image_url: stored.image_url,
            order: stored.order,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

/// Collection-backed repository for one record type
pub struct MongoRepository<T: MongoRecord> {
    db: Database,
    collection: Collection<T::Stored>,
}

impl<T: MongoRecord> MongoRepository<T> {
    /// Open the collection and make sure its unique index exists
    pub async fn open(db: &Database) -> ServiceResult<Self> {
        let collection = db.collection::<T::Stored>(T::COLLECTION);
        let mut keys = Document::new();
        keys.insert(T::UNIQUE_FIELD, 1);
        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection.create_index(index, None).await?;
        debug!(target: "tagbook-services", "Collection '{}' ready", T::COLLECTION);
        Ok(Self {
            db: db.clone(),
            collection,
        })
    }
}

#[async_trait]
impl<T: MongoRecord> Repository<T> for MongoRepository<T> {
    async fn find_all(&self) -> ServiceResult<Vec<T>> {
        let options = FindOptions::builder().sort(T::sort_spec()).build();
        let cursor = self.collection.find(None, options).await?;
        let stored: Vec<T::Stored> = cursor.try_collect().await?;
        Ok(stored.into_iter().map(T::from_stored).collect())
    }

    async fn find_by_id(&self, id: &str) -> ServiceResult<Option<T>> {
        let Some(filter) = id_filter(id) else {
            return Ok(None);
        };
        Ok(self.collection.find_one(filter, None).await?.map(T::from_stored))
    }

    async fn find_by_unique_key(&self, key: &str) -> ServiceResult<Option<T>> {
        let mut filter = Document::new();
        filter.insert(T::UNIQUE_FIELD, key);
        Ok(self.collection.find_one(filter, None).await?.map(T::from_stored))
    }

    async fn insert(&self, record: T) -> ServiceResult<T> {
        match self.collection.insert_one(record.to_stored()?, None).await {
            Ok(_) => Ok(record),
            Err(e) if is_duplicate_key(&e) => Err(duplicate::<T>(record.unique_key())),
            Err(e) => Err(e.into()),
        }
    }

    async fn replace(&self, record: T) -> ServiceResult<T> {
        let stored = record.to_stored()?;
        let result = match self
            .collection
            .replace_one(doc! { "_id": object_id(record.id())? }, stored, None)
            .await
        {
            Ok(result) => result,
            Err(e) if is_duplicate_key(&e) => return Err(duplicate::<T>(record.unique_key())),
            Err(e) => return Err(e.into()),
        };
        if result.matched_count == 0 {
            return Err(ServiceError::not_found(T::RESOURCE, record.id()));
        }
        Ok(record)
    }

    async fn delete(&self, id: &str) -> ServiceResult<bool> {
        let Some(filter) = id_filter(id) else {
            return Ok(false);
        };
        let result = self.collection.delete_one(filter, None).await?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_all(&self) -> ServiceResult<u64> {
        let result = self.collection.delete_many(doc! {}, None).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> ServiceResult<()> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::spec::ElementType;

    #[test]
    fn test_reads_mongoose_meta_tag() {
        let oid = ObjectId::new();
        let now = bson::DateTime::now();
        let stored: MetaTagDocument = bson::from_document(doc! {
            "_id": oid,
            "name": "Verse",
            "description": "Verse lyrics",
            "syntax": "[Verse]",
            "examples": [
                { "_id": ObjectId::new(), "prompt": "[Verse] la la", "description": "short" }
            ],
            "category": "Structure",
            "createdAt": now,
            "updatedAt": now,
            "__v": 0,
        })
        .unwrap();

        let tag = MetaTag::from_stored(stored);
        assert_eq!(tag.id, oid.to_hex());
        assert_eq!(tag.category, MetaTagCategory::Structure);
        assert_eq!(tag.examples, vec![Example::new("[Verse] la la", "short")]);
        assert_eq!(tag.created_at.timestamp_millis(), now.timestamp_millis());

        let written = bson::to_document(&tag.to_stored().unwrap()).unwrap();
        assert_eq!(written.get("_id").unwrap().element_type(), ElementType::ObjectId);
        assert_eq!(written.get_object_id("_id").unwrap(), oid);
        assert_eq!(written.get("createdAt").unwrap().element_type(), ElementType::DateTime);
        assert_eq!(written.get("updatedAt").unwrap().element_type(), ElementType::DateTime);
    }

    #[test]
    fn test_reads_mongoose_feature_with_double_order() {
        let stored: FeatureDocument = bson::from_document(doc! {
            "_id": ObjectId::new(),
            "title": "Custom Mode",
            "description": "d",
            "howToUse": "h",
            "examples": [{ "prompt": "p" }],
            "order": 2.0,
            "createdAt": bson::DateTime::now(),
            "updatedAt": bson::DateTime::now(),
            "__v": 0,
        })
        .unwrap();

        let feature = Feature::from_stored(stored);
        assert_eq!(feature.order, 2);
        assert_eq!(feature.image_url, "");
        assert_eq!(feature.examples[0].description, "");
    }

    #[test]
    fn test_id_filter() {
        let oid = ObjectId::new();
        assert_eq!(id_filter(&oid.to_hex()), Some(doc! { "_id": oid }));
        assert_eq!(id_filter("not-an-id"), None);
    }
}
