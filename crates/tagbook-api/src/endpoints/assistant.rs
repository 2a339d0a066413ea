// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
 * AI assistant endpoints
 *
 * Thin relays to the hosted chat-completion model. Upstream failures answer
 * 500 with a per-endpoint message and the cause in `error`.
 */

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use tagbook_services::{ChatMessage, PromptBrief, ServiceError};

use crate::common::{ApiError, ApiErrorCode, ApiResult};
use crate::dtos::{
    AnalyzePromptRequest, AnalyzePromptResponse, ChatRequest, ChatResponse, GeneratePromptResponse,
};
use crate::transports::http::server::ApiState;

/// Map an assistant failure; input problems stay 400
fn assistant_error(context: &str, err: ServiceError) -> ApiError {
    match err {
        ServiceError::InvalidInput(msg) => ApiError::invalid_input(msg),
        other => {
            tracing::error!(target: "tagbook-api", "{}: {}", context, other);
            ApiError::new(context)
                .with_code(ApiErrorCode::Internal)
                .with_error(other.to_string())
        }
    }
}

/// POST /api/assistant/chat
#[utoipa::path(
    post,
    path = "/api/assistant/chat",
    tag = "Assistant",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Messages missing or malformed", body = ApiError),
        (status = 500, description = "Error connecting to AI assistant", body = ApiError)
    )
)]
pub async fn chat(
    State(state): State<ApiState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let Json(mut body) = payload?;
    let messages = match body.get_mut("messages").map(Value::take) {
        Some(messages @ Value::Array(_)) => messages,
        _ => {
            return Err(ApiError::invalid_input(
                "Messages must be provided as an array",
            ))
        }
    };
    let messages: Vec<ChatMessage> = serde_json::from_value(messages)
        .map_err(|e| ApiError::invalid_input(format!("Invalid message: {}", e)))?;

    let reply = state
        .assistant_service
        .chat(messages)
        .await
        .map_err(|e| assistant_error("Error connecting to AI assistant", e))?;

    Ok(Json(ChatResponse {
        response: reply.content,
        usage: reply.usage,
    }))
}

/// POST /api/assistant/analyze-prompt
#[utoipa::path(
    post,
    path = "/api/assistant/analyze-prompt",
    tag = "Assistant",
    request_body = AnalyzePromptRequest,
    responses(
        (status = 200, description = "Prompt analysis", body = AnalyzePromptResponse),
        (status = 400, description = "Prompt is required", body = ApiError),
        (status = 500, description = "Error analyzing prompt", body = ApiError)
    )
)]
pub async fn analyze_prompt(
    State(state): State<ApiState>,
    payload: Result<Json<AnalyzePromptRequest>, JsonRejection>,
) -> ApiResult<Json<AnalyzePromptResponse>> {
    let Json(request) = payload?;
    let reply = state
        .assistant_service
        .analyze_prompt(&request.prompt)
        .await
        .map_err(|e| assistant_error("Error analyzing prompt", e))?;

    Ok(Json(AnalyzePromptResponse {
        analysis: reply.content,
        usage: reply.usage,
    }))
}

/// POST /api/assistant/generate-prompt
#[utoipa::path(
    post,
    path = "/api/assistant/generate-prompt",
    tag = "Assistant",
    request_body = PromptBrief,
    responses(
        (status = 200, description = "Generated prompt", body = GeneratePromptResponse),
        (status = 400, description = "Description, genre and mood all empty", body = ApiError),
        (status = 500, description = "Error generating prompt", body = ApiError)
    )
)]
pub async fn generate_prompt(
    State(state): State<ApiState>,
    payload: Result<Json<PromptBrief>, JsonRejection>,
) -> ApiResult<Json<GeneratePromptResponse>> {
    let Json(brief) = payload?;
    let reply = state
        .assistant_service
        .generate_prompt(&brief)
        .await
        .map_err(|e| assistant_error("Error generating prompt", e))?;

    Ok(Json(GeneratePromptResponse {
        generated_prompt: reply.content,
        usage: reply.usage,
    }))
}
