//! HTTP API Client
//!
//! Functions for communicating with the RecipeBox REST API.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

/// Local storage key overriding the API base URL
pub const API_URL_KEY: &str = "recipebox_api_url";

/// Get the API base URL from local storage, else the page origin
pub fn get_api_base() -> String {
    let window = match web_sys::window() {
        Some(window) => window,
        None => return String::new(),
    };

    let url = window
        .local_storage()
        .ok()
        .flatten()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .or_else(|| window.location().origin().ok())
        .unwrap_or_default();

    normalize_base(&url)
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url);
        }
    }
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// ============ Wire Types ============

/// A recipe as the list endpoints return it
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_base64: Option<String>,
    /// Only present on the all-recipes listing
    #[serde(default)]
    pub owner: Option<String>,
}

impl Recipe {
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Image source, only for `data:image/` URIs
    pub fn image_src(&self) -> Option<&str> {
        self.image_base64
            .as_deref()
            .filter(|src| src.starts_with("data:image/"))
    }

    pub fn owner_line(&self) -> Option<String> {
        self.owner.as_ref().map(|owner| format!("By: {}", owner))
    }
}

/// Generic `{success, message}` reply
#[derive(Debug, Default, serde::Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, serde::Serialize)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub owner_id: i64,
    pub image_base64: Option<String>,
}

#[derive(serde::Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(serde::Serialize)]
struct RecipeUpdateBody<'a> {
    title: &'a str,
    description: &'a str,
}

/// Why a request did not succeed
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFailure {
    /// No usable reply: network error or unreadable body
    Network(String),
    /// The server answered with a non-success status
    Rejected(Option<String>),
}

impl ApiFailure {
    /// Message to show: the server's own message, `fallback` when it sent
    /// none, or `server_error` when there was no reply at all
    pub fn message_or(&self, fallback: &str, server_error: &str) -> String {
        match self {
            ApiFailure::Network(_) => server_error.to_string(),
            ApiFailure::Rejected(Some(message)) => message.clone(),
            ApiFailure::Rejected(None) => fallback.to_string(),
        }
    }

    pub fn is_server_reply(&self) -> bool {
        matches!(self, ApiFailure::Rejected(_))
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiFailure::Network(e) => write!(f, "Network error: {}", e),
            ApiFailure::Rejected(Some(m)) => write!(f, "Rejected: {}", m),
            ApiFailure::Rejected(None) => write!(f, "Rejected"),
        }
    }
}

// ============ API Functions ============

async fn check(response: Response) -> Result<Response, ApiFailure> {
    if response.ok() {
        return Ok(response);
    }
    let reply: Reply = response.json().await.unwrap_or_default();
    Err(ApiFailure::Rejected(reply.message))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiFailure> {
    response
        .json()
        .await
        .map_err(|e| ApiFailure::Network(format!("Parse error: {}", e)))
}

/// Mutation replies may have an empty body
async fn reply(response: Response) -> Result<Reply, ApiFailure> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;
    if text.trim().is_empty() {
        return Ok(Reply::default());
    }
    serde_json::from_str(&text).map_err(|e| ApiFailure::Network(format!("Parse error: {}", e)))
}

fn network(e: gloo_net::Error) -> ApiFailure {
    ApiFailure::Network(e.to_string())
}

/// Create an account
pub async fn register(username: &str, password: &str) -> Result<Reply, ApiFailure> {
    let response = Request::post(&format!("{}/register", get_api_base()))
        .json(&CredentialsBody { username, password })
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    reply(check(response).await?).await
}

/// Log in, returning the user id on success
pub async fn login(username: &str, password: &str) -> Result<LoginReply, ApiFailure> {
    let response = Request::post(&format!("{}/login", get_api_base()))
        .json(&CredentialsBody { username, password })
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    decode(check(response).await?).await
}

/// Fetch every recipe, newest first
pub async fn fetch_recipes() -> Result<Vec<Recipe>, ApiFailure> {
    let response = Request::get(&format!("{}/recipes", get_api_base()))
        .send()
        .await
        .map_err(network)?;

    decode(check(response).await?).await
}

/// Fetch the recipes owned by `user_id`
pub async fn fetch_my_recipes(user_id: i64) -> Result<Vec<Recipe>, ApiFailure> {
    let response = Request::get(&format!("{}/my_recipes/{}", get_api_base(), user_id))
        .send()
        .await
        .map_err(network)?;

    decode(check(response).await?).await
}

pub async fn add_recipe(recipe: &NewRecipe) -> Result<Reply, ApiFailure> {
    let response = Request::post(&format!("{}/add_recipe", get_api_base()))
        .json(recipe)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    reply(check(response).await?).await
}

pub async fn edit_recipe(
    id: i64,
    user_id: i64,
    title: &str,
    description: &str,
) -> Result<Reply, ApiFailure> {
    let response = Request::put(&format!(
        "{}/edit_recipe/{}/{}",
        get_api_base(),
        id,
        user_id
    ))
    .json(&RecipeUpdateBody { title, description })
    .map_err(network)?
    .send()
    .await
    .map_err(network)?;

    reply(check(response).await?).await
}

pub async fn delete_recipe(id: i64, user_id: i64) -> Result<Reply, ApiFailure> {
    let response = Request::delete(&format!(
        "{}/delete_recipe/{}/{}",
        get_api_base(),
        id,
        user_id
    ))
    .send()
    .await
    .map_err(network)?;

    reply(check(response).await?).await
}
