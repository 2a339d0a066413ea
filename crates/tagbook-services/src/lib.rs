// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
# Tagbook Service Layer

Transport-agnostic services behind the Tagbook HTTP API and CLI.

## Architecture

```text
┌──────────────────────────────────────────────────────────┐
│                  TRANSPORT ADAPTERS                      │
│  tagbook-api (axum), `tagbook seed` CLI                  │
└────────────────────────────┬─────────────────────────────┘
                             ↓
┌──────────────────────────────────────────────────────────┐
│              SERVICE LAYER (This Crate)                  │
│  • MetaTagService    - meta tag catalog CRUD             │
│  • FeatureService    - feature catalog CRUD              │
│  • AssistantService  - hosted chat-completion proxy      │
└────────────────────────────┬─────────────────────────────┘
                             ↓
┌──────────────────────────────────────────────────────────┐
│  storage::Repository (MongoDB / memory), reqwest client  │
└──────────────────────────────────────────────────────────┘
```

Adapters depend on the traits and map [`ServiceError`] onto their own
status codes.

```rust,no_run
use std::sync::Arc;
use tagbook_services::{MetaTagService, MetaTagServiceImpl, Storage};

# async fn demo() -> tagbook_services::ServiceResult<()> {
let storage = Storage::memory();
let meta_tags: Arc<dyn MetaTagService> = Arc::new(MetaTagServiceImpl::new(storage.meta_tags.clone()));
for tag in meta_tags.list_meta_tags().await? {
    println!("{} {}", tag.category, tag.syntax);
}
# Ok(())
# }
```

## Features
- `mongo` (default): MongoDB repositories
*/

pub mod impls;
pub mod seed;
pub mod storage;
pub mod traits;
pub mod types;

pub use traits::{AssistantService, FeatureService, MetaTagService};

pub use types::{
    // Content
    Example, Feature, FeatureChanges, MetaTag, MetaTagCategory, MetaTagChanges, NewFeature,
    NewMetaTag, is_valid_record_id, new_record_id,
    // Assistant
    AssistantReply, ChatMessage, CompletionUsage, PromptBrief,
    // Errors
    ServiceError, ServiceResult,
};

pub use impls::{ChatCompletionsAssistant, FeatureServiceImpl, MetaTagServiceImpl};
pub use seed::SeedSummary;
pub use storage::{Record, Repository, Storage};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
