// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Assistant backed by an OpenAI-compatible `/chat/completions` endpoint.
*/

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tagbook_config::AssistantConfig;
use tracing::{debug, warn};

use super::prompts;
use crate::traits::AssistantService;
use crate::types::*;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
    stop: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: CompletionUsage,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion client for the assistant endpoints
pub struct ChatCompletionsAssistant {
    client: reqwest::Client,
    endpoint: String,
    config: AssistantConfig,
}

impl ChatCompletionsAssistant {
    pub fn new(config: &AssistantConfig) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::Internal(format!("failed to build HTTP client: {}", e)))?;
        let endpoint = format!("{}/chat/completions", config.api_base_url.trim_end_matches('/'));
        if config.api_key.is_empty() {
            warn!(target: "tagbook-services", "Assistant API key is not set; assistant requests will fail");
        }
        Ok(Self {
            client,
            endpoint,
            config: config.clone(),
        })
    }

    async fn complete(&self, messages: &[ChatMessage]) -> ServiceResult<AssistantReply> {
        if self.config.api_key.is_empty() {
            return Err(ServiceError::Upstream(
                "assistant API key is not configured".to_string(),
            ));
        }

        let request = CompletionRequest {
            messages,
            model: &self.config.model,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
            stream: false,
            stop: None,
        };

        debug!(
            target: "tagbook-services",
            "Sending {} messages to {}",
            messages.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Upstream(format!(
                "{} {}",
                status,
                upstream_error_message(&body)
            )));
        }

        let completion: CompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| ServiceError::Upstream("model returned no choices".to_string()))?;

        Ok(AssistantReply {
            content,
            usage: completion.usage,
        })
    }
}

/// Pull `error.message` out of an OpenAI-style error body, else return the body
fn upstream_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl AssistantService for ChatCompletionsAssistant {
    async fn chat(&self, messages: Vec<ChatMessage>) -> ServiceResult<AssistantReply> {
        let mut conversation = Vec::with_capacity(messages.len() + 1);
        conversation.push(ChatMessage::system(prompts::CHAT_SYSTEM_PROMPT));
        conversation.extend(messages);
        self.complete(&conversation).await
    }

    async fn analyze_prompt(&self, prompt: &str) -> ServiceResult<AssistantReply> {
        if prompt.is_empty() {
            return Err(ServiceError::InvalidInput("Prompt is required".to_string()));
        }
        let conversation = [
            ChatMessage::system(prompts::ANALYZE_SYSTEM_PROMPT),
            ChatMessage::user(prompts::analyze_request(prompt)),
        ];
        self.complete(&conversation).await
    }

    async fn generate_prompt(&self, brief: &PromptBrief) -> ServiceResult<AssistantReply> {
        if brief.is_empty() {
            return Err(ServiceError::InvalidInput(
                "At least one of description, genre, or mood is required".to_string(),
            ));
        }
        let conversation = [
            ChatMessage::system(prompts::GENERATE_SYSTEM_PROMPT),
            ChatMessage::user(brief.to_request_text()),
        ];
        self.complete(&conversation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> AssistantConfig {
        AssistantConfig {
            api_base_url: format!("{}/openai/v1/", server.uri()),
            api_key: "test-key".to_string(),
            ..Default::default()
        }
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        })
    }

    #[tokio::test]
    async fn test_chat_prepends_system_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "deepseek-r1-distill-llama-70b",
                "max_tokens": 4096,
                "stream": false,
                "stop": null,
                "messages": [
                    { "role": "system", "content": prompts::CHAT_SYSTEM_PROMPT },
                    { "role": "user", "content": "What does [Bridge] do?" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("It adds contrast.")))
            .expect(1)
            .mount(&server)
            .await;

        let assistant = ChatCompletionsAssistant::new(&config_for(&server)).unwrap();
        let reply = assistant
            .chat(vec![ChatMessage::user("What does [Bridge] do?")])
            .await
            .unwrap();
        assert_eq!(reply.content, "It adds contrast.");
        assert_eq!(reply.usage["total_tokens"], 15);
    }

    #[tokio::test]
    async fn test_analyze_quotes_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "messages": [
                    { "role": "system", "content": prompts::ANALYZE_SYSTEM_PROMPT },
                    { "role": "user", "content": "Please analyze this Suno music prompt: \"lofi beats\"" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Solid start.")))
            .mount(&server)
            .await;

        let assistant = ChatCompletionsAssistant::new(&config_for(&server)).unwrap();
        let reply = assistant.analyze_prompt("lofi beats").await.unwrap();
        assert_eq!(reply.content, "Solid start.");
    }

    #[tokio::test]
    async fn test_generate_requires_brief() {
        let server = MockServer::start().await;
        let assistant = ChatCompletionsAssistant::new(&config_for(&server)).unwrap();
        let err = assistant
            .generate_prompt(&PromptBrief::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "error": { "message": "Invalid API Key" } })),
            )
            .mount(&server)
            .await;

        let assistant = ChatCompletionsAssistant::new(&config_for(&server)).unwrap();
        let err = assistant
            .generate_prompt(&PromptBrief {
                genre: "synthwave".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        match err {
            ServiceError::Upstream(message) => assert!(message.contains("Invalid API Key")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_and_missing_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let assistant = ChatCompletionsAssistant::new(&config_for(&server)).unwrap();
        assert!(matches!(
            assistant.chat(vec![]).await,
            Err(ServiceError::Upstream(_))
        ));

        let keyless = ChatCompletionsAssistant::new(&AssistantConfig {
            api_key: String::new(),
            ..config_for(&server)
        })
        .unwrap();
        let err = keyless.analyze_prompt("x").await.unwrap_err();
        assert!(err.to_string().contains("API key"));
    }
}
