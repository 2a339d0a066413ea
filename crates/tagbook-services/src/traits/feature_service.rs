// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! Feature service trait

use async_trait::async_trait;

use crate::types::*;

/// Product feature catalog operations
#[async_trait]
pub trait FeatureService: Send + Sync {
    /// All features, ordered by `order`
    async fn list_features(&self) -> ServiceResult<Vec<Feature>>;

    async fn get_feature(&self, id: &str) -> ServiceResult<Feature>;

    /// Create a feature
    ///
    /// # Errors
    /// `InvalidInput` for missing fields, `AlreadyExists` when the title is taken
    async fn create_feature(&self, new: NewFeature) -> ServiceResult<Feature>;

    /// Merge `changes` into an existing feature
    async fn update_feature(&self, id: &str, changes: FeatureChanges) -> ServiceResult<Feature>;

    async fn delete_feature(&self, id: &str) -> ServiceResult<()>;

    async fn replace_all_features(&self, items: Vec<NewFeature>) -> ServiceResult<usize>;

    async fn clear_features(&self) -> ServiceResult<u64>;
}
