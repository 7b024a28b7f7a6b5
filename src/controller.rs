//! Client Controller
//!
//! Mediates between user actions and the RecipeBox API. The controller owns
//! the [`Session`]; the UI and the API are injected, so the same flow drives
//! the terminal front end and the tests.
//!
//! ## Flow
//!
//! 1. The UI calls an action (`login`, `add_recipe`, ...)
//! 2. Local validation runs first and never touches the network
//! 3. The API call runs; its outcome is surfaced through [`ClientUi`]
//! 4. Mutations reload the owner listing
//!
//! List loads take a generation ticket. A response whose ticket is no longer
//! the newest (another load or a logout started meanwhile) is dropped. A
//! mutation that outlives the session it started in skips its reload.

use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::client::{ClientError, RecipeApi};
use crate::image::{self, ImageFile};
use crate::models::{Credentials, NewRecipe, Recipe, RecipeId, RecipeUpdate, Reply, UserId};
use crate::render::{render_recipes, ListMode, RecipeList};
use crate::session::{Session, View};

pub const MSG_ENTER_CREDENTIALS: &str = "Enter username & password";
pub const MSG_SERVER_ERROR: &str = "Server error";
pub const MSG_REGISTERED: &str = "Registered";
pub const MSG_ERROR: &str = "Error";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MSG_LOGIN_REQUIRED: &str = "Login required";
pub const MSG_ADD_TITLE: &str = "Add a title";
pub const MSG_ADDED: &str = "Added";
pub const MSG_UPDATED: &str = "Updated";
pub const MSG_DELETED: &str = "Deleted";
pub const MSG_LOAD_ALL_FAILED: &str = "Could not load recipes";
pub const MSG_LOAD_MINE_FAILED: &str = "Could not load your recipes";
pub const PROMPT_CONFIRM_DELETE: &str = "Delete this recipe?";
pub const PROMPT_EDIT_TITLE: &str = "Edit title:";
pub const PROMPT_EDIT_DESCRIPTION: &str = "Edit description:";

/// Everything the controller needs from a front end.
///
/// `confirm` and `prompt` block until the user answers.
pub trait ClientUi: Send + Sync {
    /// Inline message under the auth forms; empty clears it
    fn show_auth_message(&self, message: &str);

    fn alert(&self, message: &str);

    fn confirm(&self, question: &str) -> bool;

    /// `None` when the user cancels
    fn prompt(&self, question: &str, default: &str) -> Option<String>;

    /// Switch the top-level view; `welcome` is set for the recipe view
    fn show_view(&self, view: View, welcome: Option<&str>);

    fn show_recipes(&self, list: &RecipeList);

    /// Empty the add-recipe form and hide its preview
    fn clear_recipe_form(&self);

    /// Show an image preview, or hide it with `None`
    fn show_preview(&self, data_uri: Option<&str>);
}

/// Why an action did not complete
#[derive(Error, Debug)]
pub enum ActionError {
    /// Required local input missing; no request was sent
    #[error("{0}")]
    Validation(&'static str),

    /// The server answered but declined
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Remote(#[from] ClientError),

    /// The user dismissed a confirmation or prompt
    #[error("Cancelled")]
    Cancelled,
}

/// Outcome of a list load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    /// The listing was shown with this many recipes
    Rendered(usize),
    /// A newer load superseded this one; nothing was shown
    Stale,
}

/// Client Controller
pub struct Controller<A, U> {
    api: A,
    ui: U,
    session: RwLock<Session>,
    list_generation: AtomicU64,
    logouts: AtomicU64,
}

impl<A: RecipeApi, U: ClientUi> Controller<A, U> {
    /// Create a controller with an anonymous session
    pub fn new(api: A, ui: U) -> Self {
        Self::with_session(api, ui, Session::anonymous())
    }

    pub fn with_session(api: A, ui: U, session: Session) -> Self {
        Self {
            api,
            ui,
            session: RwLock::new(session),
            list_generation: AtomicU64::new(0),
            logouts: AtomicU64::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Snapshot of the current session
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    async fn current_user(&self) -> Option<UserId> {
        self.session.read().await.user_id()
    }

    async fn require_user(&self) -> Result<UserId, ActionError> {
        match self.current_user().await {
            Some(user_id) => Ok(user_id),
            None => {
                self.ui.alert(MSG_LOGIN_REQUIRED);
                Err(ActionError::Validation(MSG_LOGIN_REQUIRED))
            }
        }
    }

    // ============================================
    // AUTH
    // ============================================

    pub async fn register(&self, username: &str, password: &str) -> Result<(), ActionError> {
        let credentials = self.credentials(username, password)?;

        match self.api.register(&credentials).await {
            Ok(reply) => {
                tracing::info!(username = %credentials.username, "Registered account");
                self.ui
                    .show_auth_message(reply.message.as_deref().unwrap_or(MSG_REGISTERED));
                Ok(())
            }
            Err(e) => Err(self.auth_failure(e, MSG_ERROR)),
        }
    }

    /// Log in; on success switches to the recipe view and loads the user's recipes
    pub async fn login(&self, username: &str, password: &str) -> Result<UserId, ActionError> {
        let credentials = self.credentials(username, password)?;

        let reply = match self.api.login(&credentials).await {
            Ok(reply) => reply,
            Err(e) => return Err(self.auth_failure(e, MSG_INVALID_CREDENTIALS)),
        };

        let Some(user_id) = reply.user_id else {
            let message = reply
                .message
                .unwrap_or_else(|| MSG_INVALID_CREDENTIALS.to_string());
            self.ui.show_auth_message(&message);
            return Err(ActionError::Rejected(message));
        };

        let welcome = {
            let mut session = self.session.write().await;
            session.login(user_id, credentials.username.as_str());
            session.welcome_line()
        };
        tracing::info!(user_id = %user_id, username = %credentials.username, "Logged in");

        self.ui.show_view(View::Recipes, welcome.as_deref());
        self.refresh_mine().await;

        Ok(user_id)
    }

    /// Clear the session and return to the auth view
    pub async fn logout(&self) {
        self.session.write().await.logout();
        // In-flight list loads and mutations belong to the old session
        self.list_generation.fetch_add(1, Ordering::SeqCst);
        self.logouts.fetch_add(1, Ordering::SeqCst);

        tracing::info!("Logged out");
        self.ui.show_view(View::Auth, None);
    }

    fn credentials(&self, username: &str, password: &str) -> Result<Credentials, ActionError> {
        self.ui.show_auth_message("");

        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            self.ui.show_auth_message(MSG_ENTER_CREDENTIALS);
            return Err(ActionError::Validation(MSG_ENTER_CREDENTIALS));
        }

        Ok(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    fn auth_failure(&self, error: ClientError, fallback: &str) -> ActionError {
        if error.is_server_reply() {
            let message = error.server_message().unwrap_or(fallback).to_string();
            self.ui.show_auth_message(&message);
            ActionError::Rejected(message)
        } else {
            tracing::error!(error = %error, "Auth request failed");
            self.ui.show_auth_message(MSG_SERVER_ERROR);
            ActionError::Remote(error)
        }
    }

    // ============================================
    // LISTINGS
    // ============================================

    /// Load every recipe in read-only mode; no session needed
    pub async fn load_all_recipes(&self) -> Result<ListOutcome, ActionError> {
        let ticket = self.next_ticket();
        let result = self.api.list_recipes().await;
        self.finish_load(ticket, result, ListMode::ReadOnly, MSG_LOAD_ALL_FAILED)
    }

    /// Load the current user's recipes in owner mode
    pub async fn load_my_recipes(&self) -> Result<ListOutcome, ActionError> {
        let user_id = self.require_user().await?;
        let ticket = self.next_ticket();
        let result = self.api.list_user_recipes(user_id).await;
        self.finish_load(ticket, result, ListMode::Owner, MSG_LOAD_MINE_FAILED)
    }

    fn next_ticket(&self) -> u64 {
        self.list_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn finish_load(
        &self,
        ticket: u64,
        result: Result<Vec<Recipe>, ClientError>,
        mode: ListMode,
        failure_message: &str,
    ) -> Result<ListOutcome, ActionError> {
        if self.list_generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, ?mode, "Dropping stale recipe listing");
            return Ok(ListOutcome::Stale);
        }

        match result {
            Ok(items) => {
                let list = render_recipes(&items, mode);
                self.ui.show_recipes(&list);
                Ok(ListOutcome::Rendered(list.len()))
            }
            Err(e) => {
                tracing::error!(error = %e, ?mode, "Failed to load recipes");
                self.ui.alert(failure_message);
                Err(ActionError::Remote(e))
            }
        }
    }

    /// Reload the owner listing after a mutation, unless the session that
    /// issued it has ended
    async fn refresh_after(&self, epoch: u64) {
        if self.logouts.load(Ordering::SeqCst) != epoch || self.current_user().await.is_none() {
            tracing::debug!("Session ended during request, skipping reload");
            return;
        }
        self.refresh_mine().await;
    }

    /// Reload the owner listing; failures were already surfaced
    async fn refresh_mine(&self) {
        if let Err(e) = self.load_my_recipes().await {
            tracing::debug!(error = %e, "Owner listing refresh failed");
        }
    }

    // ============================================
    // MUTATIONS
    // ============================================

    /// Create a recipe. An unreadable image is skipped, not fatal.
    pub async fn add_recipe(
        &self,
        title: &str,
        description: &str,
        image: Option<&dyn ImageFile>,
    ) -> Result<(), ActionError> {
        let owner_id = self.require_user().await?;
        let epoch = self.logouts.load(Ordering::SeqCst);

        let title = title.trim();
        if title.is_empty() {
            self.ui.alert(MSG_ADD_TITLE);
            return Err(ActionError::Validation(MSG_ADD_TITLE));
        }

        let image_base64 = match image {
            Some(file) => match image::read_as_data_uri(file).await {
                Ok(data_uri) => Some(data_uri),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read image, submitting without it");
                    None
                }
            },
            None => None,
        };

        let recipe = NewRecipe {
            title: title.to_string(),
            description: description.trim().to_string(),
            owner_id,
            image_base64,
        };

        match self.api.add_recipe(&recipe).await {
            Ok(reply) => {
                tracing::info!(title = %recipe.title, "Recipe added");
                self.ui.alert(reply.message.as_deref().unwrap_or(MSG_ADDED));
                self.ui.clear_recipe_form();
                self.refresh_after(epoch).await;
                Ok(())
            }
            Err(e) => Err(self.mutation_failure(e)),
        }
    }

    /// Change title and description of a recipe owned by the current user
    pub async fn edit_recipe(
        &self,
        id: RecipeId,
        title: &str,
        description: &str,
    ) -> Result<(), ActionError> {
        let user_id = self.require_user().await?;
        let epoch = self.logouts.load(Ordering::SeqCst);

        let title = title.trim();
        if title.is_empty() {
            self.ui.alert(MSG_ADD_TITLE);
            return Err(ActionError::Validation(MSG_ADD_TITLE));
        }

        let update = RecipeUpdate {
            title: title.to_string(),
            description: description.trim().to_string(),
        };

        let result = self.api.edit_recipe(id, user_id, &update).await;
        self.finish_mutation(result, MSG_UPDATED, epoch).await
    }

    /// Prompt for new values (pre-filled) and edit; cancelling either prompt aborts
    pub async fn begin_edit(&self, recipe: &Recipe) -> Result<(), ActionError> {
        let title = self
            .ui
            .prompt(PROMPT_EDIT_TITLE, &recipe.title)
            .ok_or(ActionError::Cancelled)?;
        let description = self
            .ui
            .prompt(PROMPT_EDIT_DESCRIPTION, &recipe.description)
            .ok_or(ActionError::Cancelled)?;

        self.edit_recipe(recipe.id, &title, &description).await
    }

    /// Delete a recipe after the user confirms
    pub async fn delete_recipe(&self, id: RecipeId) -> Result<(), ActionError> {
        if !self.ui.confirm(PROMPT_CONFIRM_DELETE) {
            tracing::debug!(recipe_id = %id, "Delete declined");
            return Err(ActionError::Cancelled);
        }

        let user_id = self.require_user().await?;
        let epoch = self.logouts.load(Ordering::SeqCst);
        let result = self.api.delete_recipe(id, user_id).await;
        self.finish_mutation(result, MSG_DELETED, epoch).await
    }

    /// Edit and delete reload the listing whenever the server answered
    async fn finish_mutation(
        &self,
        result: Result<Reply, ClientError>,
        success_message: &str,
        epoch: u64,
    ) -> Result<(), ActionError> {
        match result {
            Ok(reply) => {
                self.ui
                    .alert(reply.message.as_deref().unwrap_or(success_message));
                self.refresh_after(epoch).await;
                Ok(())
            }
            Err(e) if e.is_server_reply() => {
                let error = self.mutation_failure(e);
                self.refresh_after(epoch).await;
                Err(error)
            }
            Err(e) => Err(self.mutation_failure(e)),
        }
    }

    fn mutation_failure(&self, error: ClientError) -> ActionError {
        if error.is_server_reply() {
            let message = error.server_message().unwrap_or(MSG_ERROR).to_string();
            tracing::warn!(error = %error, "Server declined request");
            self.ui.alert(&message);
            ActionError::Rejected(message)
        } else {
            tracing::error!(error = %error, "Request failed");
            self.ui.alert(MSG_SERVER_ERROR);
            ActionError::Remote(error)
        }
    }

    // ============================================
    // IMAGE PREVIEW
    // ============================================

    /// Preview the image picked in the add form
    pub async fn preview_image(&self, image: Option<&dyn ImageFile>) {
        let Some(file) = image else {
            self.ui.show_preview(None);
            return;
        };

        match image::read_as_data_uri(file).await {
            Ok(data_uri) => self.ui.show_preview(Some(&data_uri)),
            Err(e) => tracing::warn!(error = %e, "Image read error"),
        }
    }
}
