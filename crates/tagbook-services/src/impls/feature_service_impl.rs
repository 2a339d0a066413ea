// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Feature service implementation over a [`Repository`].
*/

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

use crate::storage::{Record, Repository};
use crate::traits::FeatureService;
use crate::types::*;

/// Default implementation of FeatureService
pub struct FeatureServiceImpl {
    repo: Arc<dyn Repository<Feature>>,
}

impl FeatureServiceImpl {
    pub fn new(repo: Arc<dyn Repository<Feature>>) -> Self {
        Self { repo }
    }

    async fn load(&self, id: &str) -> ServiceResult<Feature> {
        if !is_valid_record_id(id) {
            return Err(ServiceError::not_found(Feature::RESOURCE, id));
        }
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(Feature::RESOURCE, id))
    }

    async fn ensure_title_free(&self, title: &str, owner: Option<&str>) -> ServiceResult<()> {
        match self.repo.find_by_unique_key(title).await? {
            Some(existing) if Some(existing.id.as_str()) != owner => {
                Err(ServiceError::already_exists(Feature::RESOURCE, title))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl FeatureService for FeatureServiceImpl {
    async fn list_features(&self) -> ServiceResult<Vec<Feature>> {
        self.repo.find_all().await
    }

    async fn get_feature(&self, id: &str) -> ServiceResult<Feature> {
        self.load(id).await
    }

    async fn create_feature(&self, mut new: NewFeature) -> ServiceResult<Feature> {
        new.title = new.title.trim().to_string();
        new.validate()?;
        self.ensure_title_free(&new.title, None).await?;

        let now = Utc::now();
        let feature = self
            .repo
            .insert(Feature {
                id: new_record_id(),
                title: new.title,
                description: new.description,
                how_to_use: new.how_to_use,
                examples: new.examples,
                image_url: new.image_url,
                order: new.order,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(target: "tagbook-services", "Created feature '{}' ({})", feature.title, feature.id);
        Ok(feature)
    }

    async fn update_feature(&self, id: &str, changes: FeatureChanges) -> ServiceResult<Feature> {
        let mut feature = self.load(id).await?;

        merge_text(&mut feature.title, changes.title.map(|t| t.trim().to_string()));
        merge_text(&mut feature.description, changes.description);
        merge_text(&mut feature.how_to_use, changes.how_to_use);
        merge_text(&mut feature.image_url, changes.image_url);
        if let Some(examples) = changes.examples {
            feature.examples = examples;
        }
        if let Some(order) = changes.order {
            feature.order = order;
        }
        feature.updated_at = Utc::now();

        self.ensure_title_free(&feature.title, Some(&feature.id)).await?;
        let feature = self.repo.replace(feature).await?;

        debug!(target: "tagbook-services", "Updated feature {}", feature.id);
        Ok(feature)
    }

    async fn delete_feature(&self, id: &str) -> ServiceResult<()> {
        let feature = self.load(id).await?;
        if !self.repo.delete(&feature.id).await? {
            return Err(ServiceError::not_found(Feature::RESOURCE, id));
        }
        info!(target: "tagbook-services", "Deleted feature '{}' ({})", feature.title, feature.id);
        Ok(())
    }

    async fn replace_all_features(&self, items: Vec<NewFeature>) -> ServiceResult<usize> {
        self.repo.delete_all().await?;
        let mut inserted = 0;
        for item in items {
            self.create_feature(item).await?;
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn clear_features(&self) -> ServiceResult<u64> {
        self.repo.delete_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryRepository;

    fn service() -> FeatureServiceImpl {
        FeatureServiceImpl::new(Arc::new(MemoryRepository::<Feature>::new()))
    }

    fn new_feature(title: &str, order: i64) -> NewFeature {
        NewFeature {
            title: title.into(),
            description: "What it does".into(),
            how_to_use: "How to use it".into(),
            examples: vec![],
            image_url: String::new(),
            order,
        }
    }

    #[tokio::test]
    async fn test_list_follows_order() {
        let svc = service();
        svc.create_feature(new_feature("Song Extension", 2)).await.unwrap();
        svc.create_feature(new_feature("Custom Mode", 1)).await.unwrap();
        let titles: Vec<String> = svc
            .list_features()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.title)
            .collect();
        assert_eq!(titles, vec!["Custom Mode", "Song Extension"]);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title_and_duplicates() {
        let svc = service();
        let err = svc.create_feature(new_feature("   ", 0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(ref m) if m.contains("Title is required")));

        svc.create_feature(new_feature("Custom Mode", 0)).await.unwrap();
        let err = svc
            .create_feature(new_feature(" Custom Mode", 0))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Feature already exists");
    }

    #[tokio::test]
    async fn test_update_order_zero_and_image_merge() {
        let svc = service();
        let mut new = new_feature("Custom Mode", 4);
        new.image_url = "/uploads/a.png".into();
        let feature = svc.create_feature(new).await.unwrap();

        let updated = svc
            .update_feature(
                &feature.id,
                FeatureChanges {
                    order: Some(0),
                    image_url: Some(String::new()),
                    how_to_use: Some("Open the toggle".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.order, 0);
        assert_eq!(updated.image_url, "/uploads/a.png");
        assert_eq!(updated.how_to_use, "Open the toggle");
        assert_eq!(updated.title, "Custom Mode");

        let untouched = svc
            .update_feature(&feature.id, FeatureChanges::default())
            .await
            .unwrap();
        assert_eq!(untouched.order, 0);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown() {
        let svc = service();
        let err = svc
            .update_feature("12345", FeatureChanges::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Feature not found");
        assert!(matches!(
            svc.delete_feature(&new_record_id()).await,
            Err(ServiceError::NotFound { .. })
        ));
    }
}
