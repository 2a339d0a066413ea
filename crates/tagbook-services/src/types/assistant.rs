// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! Assistant conversation types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One turn of a conversation
///
/// `role` is forwarded to the model API as given, so any role that API
/// accepts ("system", "user", "assistant", "tool", ...) passes through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    #[schema(example = "user")]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Token accounting reported by the model API, passed through untouched
pub type CompletionUsage = serde_json::Value;

/// Model answer plus its usage block
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    pub content: String,
    pub usage: CompletionUsage,
}

/// Inputs for prompt generation; at least one must be non-empty
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PromptBrief {
    pub description: String,
    pub genre: String,
    pub mood: String,
}

impl PromptBrief {
    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.genre.is_empty() && self.mood.is_empty()
    }

    /// Render the user request sent to the model
    pub fn to_request_text(&self) -> String {
        let mut text = String::from("Generate a Suno music prompt");
        if !self.description.is_empty() {
            text.push_str(&format!(" for: {}", self.description));
        }
        if !self.genre.is_empty() {
            text.push_str(&format!(" in the {} genre", self.genre));
        }
        if !self.mood.is_empty() {
            text.push_str(&format!(" with a {} mood", self.mood));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brief_text() {
        let brief = PromptBrief {
            description: "a rainy afternoon".into(),
            genre: "jazz".into(),
            mood: String::new(),
        };
        assert_eq!(
            brief.to_request_text(),
            "Generate a Suno music prompt for: a rainy afternoon in the jazz genre"
        );
        assert!(PromptBrief::default().is_empty());

        let mood_only = PromptBrief {
            mood: "calm".into(),
            ..Default::default()
        };
        assert_eq!(mood_only.to_request_text(), "Generate a Suno music prompt with a calm mood");
    }

    #[test]
    fn test_role_wire_names() {
        let msg: ChatMessage = serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();
        assert_eq!(msg.role, "assistant");
        assert_eq!(serde_json::to_string(&ChatMessage::user("x")).unwrap(), r#"{"role":"user","content":"x"}"#);
        assert_eq!(ChatMessage::system("s").role, "system");
    }

    #[test]
    fn test_other_roles_kept_verbatim() {
        let raw = r#"{"role":"tool","content":"{\"bpm\":120}"}"#;
        let msg: ChatMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.role, "tool");
        assert_eq!(serde_json::to_string(&msg).unwrap(), raw);

        assert!(serde_json::from_str::<ChatMessage>(r#"{"content":"no role"}"#).is_err());
    }
}
