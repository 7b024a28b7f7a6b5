//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use crate::api::{self, ApiFailure, Recipe};

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

/// The logged-in user
#[derive(Clone, Debug, PartialEq)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
}

impl SessionUser {
    pub fn welcome_line(&self) -> String {
        format!("Welcome, {}!", self.username)
    }
}

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Logged-in user, `None` shows the auth view
    pub user: RwSignal<Option<SessionUser>>,
    /// Recipes currently on screen
    pub recipes: RwSignal<Vec<Recipe>>,
    /// Whether the listing is the user's own (edit/delete enabled)
    pub owner_view: RwSignal<bool>,
    /// Inline message under the auth forms
    pub auth_message: RwSignal<String>,
    /// A listing request is in flight
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    /// Bumped by every listing request and by logout; older responses are dropped
    list_generation: StoredValue<u64>,
    /// Bumped by logout; mutations compare it before reloading
    logouts: StoredValue<u64>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        user: create_rw_signal(None),
        recipes: create_rw_signal(Vec::new()),
        owner_view: create_rw_signal(false),
        auth_message: create_rw_signal(String::new()),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        list_generation: store_value(0),
        logouts: store_value(0),
    };

    provide_context(state);
}

impl GlobalState {
    pub fn is_authenticated(&self) -> bool {
        self.user.with(Option::is_some)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.with_untracked(|user| user.as_ref().map(|u| u.user_id))
    }

    /// Start a session and show the user's own recipes
    pub fn login(&self, user: SessionUser) {
        self.auth_message.set(String::new());
        self.user.set(Some(user));
        self.load_mine();
    }

    /// Drop the session; in-flight listings are discarded
    pub fn logout(&self) {
        self.list_generation.update_value(|g| *g += 1);
        self.logouts.update_value(|n| *n += 1);
        self.user.set(None);
        self.recipes.set(Vec::new());
        self.owner_view.set(false);
        self.loading.set(false);
        self.auth_message.set(String::new());
    }

    /// Taken when a mutation starts, handed back to [`Self::reload_after`]
    pub fn session_epoch(&self) -> u64 {
        self.logouts.get_value()
    }

    /// Reload the owner listing unless the session that issued the
    /// mutation has ended
    pub fn reload_after(&self, epoch: u64) {
        if self.logouts.get_value() != epoch || self.user_id().is_none() {
            web_sys::console::debug_1(&"Session ended during request, skipping reload".into());
            return;
        }
        self.load_mine();
    }

    fn next_ticket(&self) -> u64 {
        self.list_generation.update_value(|g| *g += 1);
        self.list_generation.get_value()
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.list_generation.get_value() == ticket
    }

    /// Load every recipe, read-only
    pub fn load_all(&self) {
        let ticket = self.next_ticket();
        self.loading.set(true);

        let state = self.clone();
        spawn_local(async move {
            let result = api::fetch_recipes().await;
            state.finish_load(ticket, result, false, MSG_LOAD_ALL_FAILED);
        });
    }

    /// Load the logged-in user's recipes with edit/delete controls
    pub fn load_mine(&self) {
        let Some(user_id) = self.user_id() else {
            self.show_error(MSG_LOGIN_REQUIRED);
            return;
        };
        let ticket = self.next_ticket();
        self.loading.set(true);

        let state = self.clone();
        spawn_local(async move {
            let result = api::fetch_my_recipes(user_id).await;
            state.finish_load(ticket, result, true, MSG_LOAD_MINE_FAILED);
        });
    }

    fn finish_load(
        &self,
        ticket: u64,
        result: Result<Vec<Recipe>, ApiFailure>,
        owner_view: bool,
        failure_message: &str,
    ) {
        if !self.is_current(ticket) {
            web_sys::console::debug_1(&format!("Dropping stale listing #{}", ticket).into());
            return;
        }
        self.loading.set(false);

        match result {
            Ok(items) => {
                self.owner_view.set(owner_view);
                self.recipes.set(items);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Listing failed: {}", e).into());
                self.show_error(failure_message);
            }
        }
    }

    /// Report a finished mutation and reload the owner listing when the
    /// server answered
    pub fn finish_mutation(
        &self,
        result: Result<api::Reply, ApiFailure>,
        success_message: &str,
        epoch: u64,
    ) {
        match result {
            Ok(reply) => {
                self.show_success(reply.message.as_deref().unwrap_or(success_message));
                self.reload_after(epoch);
            }
            Err(e) => {
                self.show_error(&e.message_or(MSG_ERROR, MSG_SERVER_ERROR));
                if e.is_server_reply() {
                    self.reload_after(epoch);
                }
            }
        }
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
