//! Data Transfer Objects
//!
//! Recipe records and the request/response bodies exchanged with the
//! RecipeBox REST API. Field names follow the wire format.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================
// IDENTIFIERS
// ============================================

/// Server-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Server-assigned recipe identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================
// RECIPES
// ============================================

/// A recipe as returned by `/recipes` and `/my_recipes/{user_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    /// Empty when the server stored no description
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Only present on endpoints that expose it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    /// Owner display name (only on the public listing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Image as a data URI
    #[serde(default, rename = "image_base64")]
    pub image_data: Option<String>,
}

impl Recipe {
    pub fn new(id: RecipeId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            owner_id: None,
            owner: None,
            image_data: None,
        }
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn image(mut self, data_uri: impl Into<String>) -> Self {
        self.image_data = Some(data_uri.into());
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================
// REQUESTS
// ============================================

/// Body of `/register` and `/login`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /add_recipe`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub owner_id: UserId,
    /// Serialized as `null` when no image was attached
    pub image_base64: Option<String>,
}

/// Body of `PUT /edit_recipe/{id}/{user_id}`; the image is never sent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeUpdate {
    pub title: String,
    pub description: String,
}

// ============================================
// RESPONSES
// ============================================

/// Generic `{success, message}` reply used by the mutation endpoints
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    /// Id of a newly created record (register, add)
    #[serde(default)]
    pub id: Option<i64>,
}

/// Reply of `POST /login`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
}
