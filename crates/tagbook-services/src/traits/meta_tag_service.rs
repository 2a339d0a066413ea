// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! Meta tag service trait

use async_trait::async_trait;

use crate::types::*;

/// Meta tag catalog operations
#[async_trait]
pub trait MetaTagService: Send + Sync {
    /// All meta tags, ordered by category then name
    async fn list_meta_tags(&self) -> ServiceResult<Vec<MetaTag>>;

    /// Get one meta tag
    ///
    /// # Errors
    /// `NotFound` for an unknown or malformed id
    async fn get_meta_tag(&self, id: &str) -> ServiceResult<MetaTag>;

    /// Create a meta tag
    ///
    /// # Errors
    /// * `InvalidInput` - missing fields, unknown category or incomplete example
    /// * `AlreadyExists` - the name is taken
    async fn create_meta_tag(&self, new: NewMetaTag) -> ServiceResult<MetaTag>;

    /// Merge `changes` into an existing meta tag
    async fn update_meta_tag(&self, id: &str, changes: MetaTagChanges) -> ServiceResult<MetaTag>;

    async fn delete_meta_tag(&self, id: &str) -> ServiceResult<()>;

    /// Drop every meta tag and insert `items`; returns how many were inserted
    async fn replace_all_meta_tags(&self, items: Vec<NewMetaTag>) -> ServiceResult<usize>;

    /// Drop every meta tag; returns how many were removed
    async fn clear_meta_tags(&self) -> ServiceResult<u64>;
}
