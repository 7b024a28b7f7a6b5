//! RecipeBox API
//!
//! The REST operations the client needs, behind a trait so the controller
//! can run against the real backend or a test double.
//!
//! ## Endpoints
//!
//! - `POST /register` - create an account
//! - `POST /login` - exchange credentials for a user id
//! - `GET /recipes` - every recipe, with owner names
//! - `GET /my_recipes/{user_id}` - recipes of one user
//! - `POST /add_recipe` - create a recipe
//! - `PUT /edit_recipe/{id}/{user_id}` - change title and description
//! - `DELETE /delete_recipe/{id}/{user_id}` - remove a recipe

mod http;

pub use http::{ClientConfig, HttpRecipeApi};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Credentials, LoginReply, NewRecipe, Recipe, RecipeId, RecipeUpdate, Reply, UserId};

/// Remote operations of the RecipeBox backend
#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn register(&self, credentials: &Credentials) -> Result<Reply, ClientError>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, ClientError>;

    async fn list_recipes(&self) -> Result<Vec<Recipe>, ClientError>;

    async fn list_user_recipes(&self, user_id: UserId) -> Result<Vec<Recipe>, ClientError>;

    async fn add_recipe(&self, recipe: &NewRecipe) -> Result<Reply, ClientError>;

    async fn edit_recipe(
        &self,
        id: RecipeId,
        user_id: UserId,
        update: &RecipeUpdate,
    ) -> Result<Reply, ClientError>;

    async fn delete_recipe(&self, id: RecipeId, user_id: UserId) -> Result<Reply, ClientError>;
}

/// Errors that can occur when talking to the RecipeBox backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("RecipeBox API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {}", message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Message the server attached to a rejected request, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// True when the server answered (as opposed to a transport failure)
    pub fn is_server_reply(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }
}
