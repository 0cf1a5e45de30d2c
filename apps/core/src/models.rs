use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// A catalog entry for a herb.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Herb {
    pub id: i64,
    pub plant_name: String,
    pub scientific_name: String,
    pub description: String,
    /// Free-form benefits text shown on the detail page.
    pub benefits: String,
    pub cultivation: Option<String>,
    pub climate: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub model_3d_url: Option<String>,
    pub usage_instructions: Option<String>,
    /// Unpublished herbs are hidden from the public listing.
    pub is_published: bool,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of the last update.
    pub updated_at: i64,
}

fn default_published() -> bool {
    true
}

/// Payload for creating a herb.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewHerb {
    #[validate(length(min = 1, max = 255))]
    pub plant_name: String,
    #[validate(length(min = 1, max = 255))]
    pub scientific_name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub benefits: String,
    pub cultivation: Option<String>,
    pub climate: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
    #[validate(length(max = 500))]
    pub model_3d_url: Option<String>,
    pub usage_instructions: Option<String>,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

/// Partial update for a herb.
///
/// Absent fields are left unchanged. For the nullable columns an explicit
/// `null` clears the stored value, so those are `Option<Option<_>>`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_nullable_lengths"))]
pub struct HerbUpdate {
    #[validate(length(min = 1, max = 255))]
    pub plant_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub scientific_name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub benefits: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub cultivation: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub climate: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub model_3d_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub usage_instructions: Option<Option<String>>,
    pub is_published: Option<bool>,
}

/// Present keys deserialize to `Some`, with `null` becoming `Some(None)`.
/// Absent keys never reach this function and fall back to `None`.
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn exceeds(value: &Option<Option<String>>, max: usize) -> bool {
    matches!(value, Some(Some(text)) if text.chars().count() > max)
}

fn validate_nullable_lengths(update: &HerbUpdate) -> Result<(), ValidationError> {
    if exceeds(&update.category, 100) {
        return Err(ValidationError::new("category_too_long"));
    }
    if exceeds(&update.image_url, 500) || exceeds(&update.model_3d_url, 500) {
        return Err(ValidationError::new("url_too_long"));
    }
    Ok(())
}

/// Query string filter for the public herb listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HerbFilter {
    /// Case-insensitive substring of the plant name.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<String>,
}

/// A stored symptom analysis.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub user_id: String,
    /// The symptom text exactly as submitted.
    pub symptoms: String,
    /// The serialized recommendation returned to the user.
    pub recommendation: String,
    pub recommended_herbs: Json<Vec<i64>>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: i64,
    pub user_id: String,
    pub herb_id: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    pub herb_id: i64,
}

/// Body of `POST /api/ai/recommend`.
///
/// `symptoms` is kept untyped so a missing, null or non-string value can be
/// reported with a single client-facing message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub symptoms: Option<Value>,
}

impl RecommendRequest {
    pub fn symptoms_text(&self) -> Result<&str, AppError> {
        match &self.symptoms {
            Some(Value::String(text)) if !text.is_empty() => Ok(text),
            _ => Err(AppError::Validation("Symptoms text is required".to_string())),
        }
    }
}
