// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! Assistant service trait
//!
//! Each call is one round trip to a hosted chat-completion model with a
//! fixed system prompt. Nothing is cached or retried.

use async_trait::async_trait;

use crate::types::*;

#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Continue a conversation
    ///
    /// # Arguments
    /// * `messages` - conversation so far, forwarded as-is after the system prompt
    async fn chat(&self, messages: Vec<ChatMessage>) -> ServiceResult<AssistantReply>;

    /// Critique a music prompt and suggest a rewrite
    async fn analyze_prompt(&self, prompt: &str) -> ServiceResult<AssistantReply>;

    /// Write a new music prompt from a short brief
    async fn generate_prompt(&self, brief: &PromptBrief) -> ServiceResult<AssistantReply>;
}
