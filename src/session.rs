//! Client Session
//!
//! The record of who is logged in. The visible view is derived from it, so
//! an authenticated session always means the recipe view is shown.

use crate::models::UserId;

/// Logged-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: UserId,
    pub username: String,
}

/// Client-local session; anonymous until a login succeeds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<SessionUser>,
}

/// Which top-level view the UI shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Register / login forms
    Auth,
    /// Recipe form and list
    Recipes,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user: Some(SessionUser {
                user_id,
                username: username.into(),
            }),
        }
    }

    /// Replace the current user
    pub fn login(&mut self, user_id: UserId, username: impl Into<String>) {
        *self = Self::authenticated(user_id, username);
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.user_id)
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn view(&self) -> View {
        if self.is_authenticated() {
            View::Recipes
        } else {
            View::Auth
        }
    }

    /// Greeting shown above the recipe view
    pub fn welcome_line(&self) -> Option<String> {
        self.username().map(|name| format!("Welcome, {}!", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_session() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert_eq!(session.user_id(), None);
        assert_eq!(session.view(), View::Auth);
        assert_eq!(session.welcome_line(), None);
    }

    #[test]
    fn test_login_logout_cycle() {
        let mut session = Session::anonymous();

        session.login(UserId(9), "bob");
        assert_eq!(session.user_id(), Some(UserId(9)));
        assert_eq!(session.username(), Some("bob"));
        assert_eq!(session.view(), View::Recipes);
        assert_eq!(session.welcome_line().as_deref(), Some("Welcome, bob!"));

        session.logout();
        assert_eq!(session, Session::anonymous());
        assert_eq!(session.view(), View::Auth);
    }

    #[test]
    fn test_login_replaces_previous_user() {
        let mut session = Session::authenticated(UserId(1), "alice");
        session.login(UserId(2), "carol");
        assert_eq!(session.user_id(), Some(UserId(2)));
        assert_eq!(session.username(), Some("carol"));
    }
}
