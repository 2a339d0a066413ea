// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Service implementations.
*/

pub mod assistant_service_impl;
pub mod feature_service_impl;
pub mod meta_tag_service_impl;
pub mod prompts;

pub use assistant_service_impl::ChatCompletionsAssistant;
pub use feature_service_impl::FeatureServiceImpl;
pub use meta_tag_service_impl::MetaTagServiceImpl;
