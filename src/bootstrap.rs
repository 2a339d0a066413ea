// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! Builds the runtime object graph from a loaded configuration.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;
use tagbook_api::{AdminAuth, ApiState, UploadSettings};
use tagbook_config::TagbookConfig;
use tagbook_services::{
    seed, ChatCompletionsAssistant, FeatureService, FeatureServiceImpl, MetaTagService,
    MetaTagServiceImpl, Storage,
};

/// Catalog services over an opened storage backend
#[derive(Clone)]
pub struct Services {
    pub storage: Storage,
    pub meta_tags: Arc<dyn MetaTagService + Send + Sync>,
    pub features: Arc<dyn FeatureService + Send + Sync>,
}

impl Services {
    pub fn over(storage: Storage) -> Self {
        Self {
            meta_tags: Arc::new(MetaTagServiceImpl::new(storage.meta_tags.clone())),
            features: Arc::new(FeatureServiceImpl::new(storage.features.clone())),
            storage,
        }
    }
}

/// Connect the configured storage backend and build the catalog services
pub async fn open_services(config: &TagbookConfig) -> Result<Services> {
    let storage = Storage::connect(&config.storage)
        .await
        .with_context(|| format!("Failed to open {} storage", config.storage.backend))?;
    Ok(Services::over(storage))
}

/// Everything the HTTP server needs, seeded when configured to
pub async fn build_state(config: &TagbookConfig) -> Result<ApiState> {
    let services = open_services(config).await?;

    if config.storage.seed_if_empty {
        let summary =
            seed::seed_if_empty(services.meta_tags.as_ref(), services.features.as_ref())
                .await
                .context("Failed to seed empty catalog")?;
        if summary.meta_tags + summary.features > 0 {
            tracing::info!(
                target: "tagbook",
                "Seeded {} meta tags and {} features",
                summary.meta_tags,
                summary.features
            );
        }
    }

    let assistant = ChatCompletionsAssistant::new(&config.assistant)
        .context("Failed to build assistant client")?;

    tokio::fs::create_dir_all(&config.uploads.dir)
        .await
        .with_context(|| format!("Failed to create upload directory {}", config.uploads.dir.display()))?;

    if let Some(dir) = &config.static_site.dir {
        if !dir.join("index.html").is_file() {
            tracing::warn!(
                target: "tagbook",
                "Static site directory {} has no index.html",
                dir.display()
            );
        }
    }

    Ok(ApiState {
        meta_tag_service: services.meta_tags,
        feature_service: services.features,
        assistant_service: Arc::new(assistant),
        storage: services.storage,
        auth: Arc::new(AdminAuth::from_config(&config.auth)),
        uploads: Arc::new(UploadSettings {
            dir: config.uploads.dir.clone(),
            max_bytes: config.uploads.max_bytes,
        }),
        static_dir: config.static_site.dir.clone(),
        started_at: Instant::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagbook_config::StorageBackendKind;

    fn memory_config(uploads: &std::path::Path) -> TagbookConfig {
        let mut config = TagbookConfig::default();
        config.storage.backend = StorageBackendKind::Memory;
        config.uploads.dir = uploads.join("images");
        config
    }

    #[tokio::test]
    async fn test_build_state_seeds_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = memory_config(dir.path());
        config.storage.seed_if_empty = true;

        let state = build_state(&config).await.unwrap();

        assert!(config.uploads.dir.is_dir());
        assert_eq!(state.meta_tag_service.list_meta_tags().await.unwrap().len(), 8);
        assert_eq!(state.feature_service.list_features().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_build_state_leaves_catalog_empty_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let state = build_state(&memory_config(dir.path())).await.unwrap();
        assert!(state.meta_tag_service.list_meta_tags().await.unwrap().is_empty());
    }
}
