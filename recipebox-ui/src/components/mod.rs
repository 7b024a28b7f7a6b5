//! UI Components
//!
//! Leptos components for the auth and recipe views.

pub mod auth_panel;
pub mod nav;
pub mod recipe_form;
pub mod recipe_list;
pub mod toast;

pub use auth_panel::AuthPanel;
pub use nav::Nav;
pub use recipe_form::RecipeForm;
pub use recipe_list::RecipeList;
pub use toast::Toast;
