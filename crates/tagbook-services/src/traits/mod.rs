// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Service trait definitions.

These traits are the boundary between transport adapters and storage or
upstream APIs.
*/

pub mod assistant_service;
pub mod feature_service;
pub mod meta_tag_service;

pub use assistant_service::AssistantService;
pub use feature_service::FeatureService;
pub use meta_tag_service::MetaTagService;
