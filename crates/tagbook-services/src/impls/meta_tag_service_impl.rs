// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Meta tag service implementation over a [`Repository`].
*/

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

use crate::storage::{Record, Repository};
use crate::traits::MetaTagService;
use crate::types::*;

/// Default implementation of MetaTagService
pub struct MetaTagServiceImpl {
    repo: Arc<dyn Repository<MetaTag>>,
}

impl MetaTagServiceImpl {
    pub fn new(repo: Arc<dyn Repository<MetaTag>>) -> Self {
        Self { repo }
    }

    async fn load(&self, id: &str) -> ServiceResult<MetaTag> {
        if !is_valid_record_id(id) {
            return Err(ServiceError::not_found(MetaTag::RESOURCE, id));
        }
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(MetaTag::RESOURCE, id))
    }

    async fn ensure_name_free(&self, name: &str, owner: Option<&str>) -> ServiceResult<()> {
        match self.repo.find_by_unique_key(name).await? {
            Some(existing) if Some(existing.id.as_str()) != owner => {
                Err(ServiceError::already_exists(MetaTag::RESOURCE, name))
            }
            _ => Ok(()),
        }
    }
}

fn check_examples(examples: &[Example]) -> ServiceResult<()> {
    for (index, example) in examples.iter().enumerate() {
        if example.prompt.is_empty() {
            return Err(ServiceError::InvalidInput(format!(
                "Example {} prompt is required",
                index + 1
            )));
        }
        if example.description.is_empty() {
            return Err(ServiceError::InvalidInput(format!(
                "Example {} description is required",
                index + 1
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl MetaTagService for MetaTagServiceImpl {
    async fn list_meta_tags(&self) -> ServiceResult<Vec<MetaTag>> {
        self.repo.find_all().await
    }

    async fn get_meta_tag(&self, id: &str) -> ServiceResult<MetaTag> {
        self.load(id).await
    }

    async fn create_meta_tag(&self, mut new: NewMetaTag) -> ServiceResult<MetaTag> {
        new.name = new.name.trim().to_string();
        new.validate()?;
        let category: MetaTagCategory = new.category.parse()?;
        check_examples(&new.examples)?;
        self.ensure_name_free(&new.name, None).await?;

        let now = Utc::now();
        let tag = self
            .repo
            .insert(MetaTag {
                id: new_record_id(),
                name: new.name,
                description: new.description,
                syntax: new.syntax,
                examples: new.examples,
                category,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(target: "tagbook-services", "Created meta tag '{}' ({})", tag.name, tag.id);
        Ok(tag)
    }

    async fn update_meta_tag(&self, id: &str, changes: MetaTagChanges) -> ServiceResult<MetaTag> {
        let mut tag = self.load(id).await?;

        merge_text(&mut tag.name, changes.name.map(|n| n.trim().to_string()));
        merge_text(&mut tag.description, changes.description);
        merge_text(&mut tag.syntax, changes.syntax);
        if let Some(category) = changes.category.filter(|c| !c.is_empty()) {
            tag.category = category.parse()?;
        }
        if let Some(examples) = changes.examples {
            check_examples(&examples)?;
            tag.examples = examples;
        }
        tag.updated_at = Utc::now();

        self.ensure_name_free(&tag.name, Some(&tag.id)).await?;
        let tag = self.repo.replace(tag).await?;

        debug!(target: "tagbook-services", "Updated meta tag {}", tag.id);
        Ok(tag)
    }

    async fn delete_meta_tag(&self, id: &str) -> ServiceResult<()> {
        let tag = self.load(id).await?;
        if !self.repo.delete(&tag.id).await? {
            return Err(ServiceError::not_found(MetaTag::RESOURCE, id));
        }
        info!(target: "tagbook-services", "Deleted meta tag '{}' ({})", tag.name, tag.id);
        Ok(())
    }

    async fn replace_all_meta_tags(&self, items: Vec<NewMetaTag>) -> ServiceResult<usize> {
        self.repo.delete_all().await?;
        let mut inserted = 0;
        for item in items {
            self.create_meta_tag(item).await?;
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn clear_meta_tags(&self) -> ServiceResult<u64> {
        self.repo.delete_all().await
    }
}
