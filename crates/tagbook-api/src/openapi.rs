// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

// OpenAPI documentation generation
//
// The document is derived at compile time from the `#[utoipa::path]`
// annotations on the handlers.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::common::{ApiError, ApiErrorCode, MessageResponse};
use crate::dtos::{
    AnalyzePromptRequest, AnalyzePromptResponse, ChatRequest, ChatResponse, CurrentUserResponse,
    GeneratePromptResponse, HealthResponse, LoginRequest, StorageHealth, TokenResponse,
    UploadForm, UploadResponse,
};
use tagbook_services::{
    ChatMessage, Example, Feature, FeatureChanges, MetaTag, MetaTagCategory,
    MetaTagChanges, NewFeature, NewMetaTag, PromptBrief,
};

/// OpenAPI documentation for the Tagbook REST API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tagbook REST API",
        description = "Meta tag and feature reference library with an AI prompt assistant",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        crate::endpoints::meta_tags::list_meta_tags,
        crate::endpoints::meta_tags::get_meta_tag,
        crate::endpoints::meta_tags::create_meta_tag,
        crate::endpoints::meta_tags::update_meta_tag,
        crate::endpoints::meta_tags::delete_meta_tag,
        crate::endpoints::features::list_features,
        crate::endpoints::features::get_feature,
        crate::endpoints::features::create_feature,
        crate::endpoints::features::update_feature,
        crate::endpoints::features::delete_feature,
        crate::endpoints::auth::login,
        crate::endpoints::auth::me,
        crate::endpoints::assistant::chat,
        crate::endpoints::assistant::analyze_prompt,
        crate::endpoints::assistant::generate_prompt,
        crate::endpoints::uploads::upload_image,
        crate::endpoints::health::health,
    ),
    components(
        schemas(
            MetaTag,
            MetaTagCategory,
            NewMetaTag,
            MetaTagChanges,
            Feature,
            NewFeature,
            FeatureChanges,
            Example,
            ChatMessage,
            PromptBrief,
            LoginRequest,
            TokenResponse,
            CurrentUserResponse,
            ChatRequest,
            ChatResponse,
            AnalyzePromptRequest,
            AnalyzePromptResponse,
            GeneratePromptResponse,
            UploadForm,
            UploadResponse,
            HealthResponse,
            StorageHealth,
            MessageResponse,
            ApiError,
            ApiErrorCode,
        )
    ),
    tags(
        (name = "Meta Tags", description = "Prompt meta tag catalog"),
        (name = "Features", description = "Product feature catalog"),
        (name = "Auth", description = "Admin login"),
        (name = "Assistant", description = "AI prompt assistant"),
        (name = "Uploads", description = "Feature images"),
        (name = "Health", description = "Server status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security scheme configuration
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token_header",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-auth-token"))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Pretty-printed OpenAPI JSON
pub fn get_openapi_json() -> String {
    ApiDoc::openapi().to_pretty_json().unwrap_or_else(|e| {
        format!(r#"{{"msg": "Failed to generate OpenAPI document: {}"}}"#, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_generation() {
        let json = get_openapi_json();
        assert!(json.contains("Tagbook REST API"));
        assert!(json.contains("/api/meta-tags/{id}"));
        assert!(json.contains("/api/assistant/generate-prompt"));
    }

    #[test]
    fn test_openapi_components() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.expect("components");
        assert!(components.schemas.contains_key("MetaTag"));
        assert!(components.schemas.contains_key("ApiError"));
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
