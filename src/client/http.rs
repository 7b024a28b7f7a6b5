//! RecipeBox REST API Client
//!
//! reqwest implementation of [`RecipeApi`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::{ClientError, RecipeApi};
use crate::models::{Credentials, LoginReply, NewRecipe, Recipe, RecipeId, RecipeUpdate, Reply, UserId};

/// Connection settings for [`HttpRecipeApi`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the backend (e.g., "http://127.0.0.1:10000")
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:10000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// RecipeBox REST API client
pub struct HttpRecipeApi {
    client: Client,
    base_url: String,
}

impl HttpRecipeApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout
            } else if e.is_connect() {
                ClientError::Unavailable
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<MessageBody>(&text)
            .ok()
            .and_then(|body| body.message);

        tracing::debug!(status = status.as_u16(), ?message, "RecipeBox API rejected request");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Decode a JSON body, rejecting anything that is not JSON
    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Decode a `{success, message}` reply; an empty body is a reply without a message
    async fn reply(response: Response) -> Result<Reply, ClientError> {
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Reply::default());
        }
        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn register(&self, credentials: &Credentials) -> Result<Reply, ClientError> {
        tracing::debug!(username = %credentials.username, "POST /register");
        let response = self
            .send(self.client.post(self.url("/register")).json(credentials))
            .await?;
        Self::reply(response).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, ClientError> {
        tracing::debug!(username = %credentials.username, "POST /login");
        let response = self
            .send(self.client.post(self.url("/login")).json(credentials))
            .await?;
        Self::json(response).await
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, ClientError> {
        tracing::debug!("GET /recipes");
        let response = self.send(self.client.get(self.url("/recipes"))).await?;
        Self::json(response).await
    }

    async fn list_user_recipes(&self, user_id: UserId) -> Result<Vec<Recipe>, ClientError> {
        let path = format!("/my_recipes/{}", user_id);
        tracing::debug!("GET {}", path);
        let response = self.send(self.client.get(self.url(&path))).await?;
        Self::json(response).await
    }

    async fn add_recipe(&self, recipe: &NewRecipe) -> Result<Reply, ClientError> {
        tracing::debug!(
            title = %recipe.title,
            has_image = recipe.image_base64.is_some(),
            "POST /add_recipe"
        );
        let response = self
            .send(self.client.post(self.url("/add_recipe")).json(recipe))
            .await?;
        Self::reply(response).await
    }

    async fn edit_recipe(
        &self,
        id: RecipeId,
        user_id: UserId,
        update: &RecipeUpdate,
    ) -> Result<Reply, ClientError> {
        let path = format!("/edit_recipe/{}/{}", id, user_id);
        tracing::debug!("PUT {}", path);
        let response = self
            .send(self.client.put(self.url(&path)).json(update))
            .await?;
        Self::reply(response).await
    }

    async fn delete_recipe(&self, id: RecipeId, user_id: UserId) -> Result<Reply, ClientError> {
        let path = format!("/delete_recipe/{}/{}", id, user_id);
        tracing::debug!("DELETE {}", path);
        let response = self.send(self.client.delete(self.url(&path))).await?;
        Self::reply(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:10000");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let api = HttpRecipeApi::new(ClientConfig {
            base_url: "http://recipes.test//".to_string(),
            request_timeout_secs: 5,
        })
        .unwrap();

        assert_eq!(api.base_url(), "http://recipes.test");
        assert_eq!(api.url("/recipes"), "http://recipes.test/recipes");
    }
}
