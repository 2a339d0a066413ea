// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! Request and response bodies owned by the HTTP layer
//!
//! Catalog records and their payloads come from `tagbook-services`; the types
//! here only exist on the wire.

use serde::{Deserialize, Serialize};
use tagbook_services::ChatMessage;
use utoipa::ToSchema;

/// `POST /api/auth/login`; `email` is accepted in place of `username`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// The authenticated admin
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub role: String,
}

/// `POST /api/assistant/chat`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    /// Token usage as reported by the model API
    #[schema(value_type = Object)]
    pub usage: serde_json::Value,
}

/// `POST /api/assistant/analyze-prompt`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AnalyzePromptRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzePromptResponse {
    pub analysis: String,
    #[schema(value_type = Object)]
    pub usage: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePromptResponse {
    pub generated_prompt: String,
    #[schema(value_type = Object)]
    pub usage: serde_json::Value,
}

/// Multipart form for `POST /api/uploads`
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Public path of the stored image
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StorageHealth {
    pub backend: String,
    pub connected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` or `degraded`
    pub status: String,
    pub storage: StorageHealth,
    pub version: String,
    pub uptime_seconds: u64,
}
