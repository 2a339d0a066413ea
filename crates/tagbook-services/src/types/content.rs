// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Content records (meta tags and features) and their create/update payloads.

JSON field names follow the document shape the front end reads:
`_id`, camelCase fields and RFC 3339 timestamps.
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use super::errors::ServiceError;

/// Generate a new record id (24-hex ObjectId string)
pub fn new_record_id() -> String {
    bson::oid::ObjectId::new().to_hex()
}

/// Whether `id` has the shape of a record id
pub fn is_valid_record_id(id: &str) -> bool {
    bson::oid::ObjectId::parse_str(id).is_ok()
}

/// A prompt example attached to a meta tag or feature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Example {
    pub prompt: String,
    pub description: String,
}

impl Example {
    pub fn new(prompt: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            description: description.into(),
        }
    }
}

/// Meta tag category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum MetaTagCategory {
    Structure,
    Mood,
    Instrumental,
    Vocals,
    Genre,
    Other,
}

impl MetaTagCategory {
    pub const ALL: [MetaTagCategory; 6] = [
        MetaTagCategory::Structure,
        MetaTagCategory::Mood,
        MetaTagCategory::Instrumental,
        MetaTagCategory::Vocals,
        MetaTagCategory::Genre,
        MetaTagCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetaTagCategory::Structure => "Structure",
            MetaTagCategory::Mood => "Mood",
            MetaTagCategory::Instrumental => "Instrumental",
            MetaTagCategory::Vocals => "Vocals",
            MetaTagCategory::Genre => "Genre",
            MetaTagCategory::Other => "Other",
        }
    }
}

impl fmt::Display for MetaTagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetaTagCategory {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetaTagCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = MetaTagCategory::ALL.iter().map(|c| c.as_str()).collect();
                ServiceError::InvalidInput(format!(
                    "`{}` is not a valid category (expected one of: {})",
                    s,
                    allowed.join(", ")
                ))
            })
    }
}

/// Meta tag record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetaTag {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub syntax: String,
    #[serde(default)]
    pub examples: Vec<Example>,
    pub category: MetaTagCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a meta tag
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct NewMetaTag {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Syntax is required"))]
    pub syntax: String,
    pub examples: Vec<Example>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
}

/// Partial update for a meta tag. Absent or empty strings keep the current value;
/// `examples` replaces the list whenever present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct MetaTagChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub syntax: Option<String>,
    pub examples: Option<Vec<Example>>,
    pub category: Option<String>,
}

/// Feature record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub how_to_use: String,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a feature
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct NewFeature {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "How to use is required"))]
    pub how_to_use: String,
    pub examples: Vec<Example>,
    pub image_url: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub order: i64,
}

/// Partial update for a feature. `order` is replaced whenever present, even when 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub how_to_use: Option<String>,
    pub examples: Option<Vec<Example>>,
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient_opt_i64")]
    pub order: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberLike {
    fn into_i64<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            NumberLike::Int(n) => Ok(n),
            NumberLike::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
            NumberLike::Float(f) => Err(E::custom(format!("order must be a finite number, got {}", f))),
            NumberLike::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| E::custom(format!("order must be a number, got `{}`", s))),
        }
    }
}

// Form inputs send numbers as strings; accept both.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberLike::deserialize(deserializer)?.into_i64()
}

fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberLike>::deserialize(deserializer)? {
        Some(n) => n.into_i64().map(Some),
        None => Ok(None),
    }
}

/// Resolve a merge-style string change: absent or empty keeps `current`.
pub(crate) fn merge_text(current: &mut String, change: Option<String>) {
    if let Some(value) = change {
        if !value.is_empty() {
            *current = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_ids() {
        let id = new_record_id();
        assert_eq!(id.len(), 24);
        assert!(is_valid_record_id(&id));
        assert!(!is_valid_record_id("not-an-id"));
        assert!(!is_valid_record_id("123"));
    }

    #[test]
    fn test_category_parse_is_exact() {
        assert_eq!("Mood".parse::<MetaTagCategory>().unwrap(), MetaTagCategory::Mood);
        let err = "mood".parse::<MetaTagCategory>().unwrap_err();
        assert!(err.to_string().contains("not a valid category"));
    }

    #[test]
    fn test_meta_tag_json_shape() {
        let now = Utc::now();
        let tag = MetaTag {
            id: new_record_id(),
            name: "Verse".into(),
            description: "d".into(),
            syntax: "[Verse]".into(),
            examples: vec![Example::new("[Verse] hi", "greeting")],
            category: MetaTagCategory::Structure,
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&tag).unwrap();
        assert!(value.get("_id").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["category"], "Structure");
        assert_eq!(value["examples"][0]["prompt"], "[Verse] hi");
    }

    #[test]
    fn test_feature_order_accepts_strings_and_numbers() {
        let new: NewFeature = serde_json::from_value(json!({
            "title": "Custom Mode", "description": "d", "howToUse": "h", "order": "3"
        }))
        .unwrap();
        assert_eq!(new.order, 3);
        assert_eq!(new.image_url, "");

        let changes: FeatureChanges = serde_json::from_value(json!({ "order": 0 })).unwrap();
        assert_eq!(changes.order, Some(0));

        let changes: FeatureChanges = serde_json::from_value(json!({ "title": "x" })).unwrap();
        assert_eq!(changes.order, None);

        assert!(serde_json::from_value::<FeatureChanges>(json!({ "order": "soon" })).is_err());
    }

    #[test]
    fn test_update_payload_ignores_echoed_fields() {
        // The admin form sends the whole record back on update.
        let changes: MetaTagChanges = serde_json::from_value(json!({
            "_id": "65f000000000000000000000",
            "name": "Verse",
            "createdAt": "2024-01-01T00:00:00Z",
            "__v": 0
        }))
        .unwrap();
        assert_eq!(changes.name.as_deref(), Some("Verse"));
    }

    #[test]
    fn test_merge_text() {
        let mut value = "old".to_string();
        merge_text(&mut value, None);
        assert_eq!(value, "old");
        merge_text(&mut value, Some(String::new()));
        assert_eq!(value, "old");
        merge_text(&mut value, Some("new".into()));
        assert_eq!(value, "new");
    }
}
