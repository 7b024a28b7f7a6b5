//! # RecipeBox
//!
//! Client for the RecipeBox recipe-sharing service: register and log in,
//! then create, list, edit and delete recipes over the RecipeBox REST API.
//!
//! ## Modules
//!
//! - [`controller`]: the Client Controller wiring user actions to the API
//! - [`client`]: REST client trait and its reqwest implementation
//! - [`session`]: who is logged in, and which view that implies
//! - [`render`]: pure rendering of recipe listings with HTML escaping
//! - [`image`]: reading images into base64 data URIs
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use recipebox::{Config, Controller, HttpRecipeApi};
//! # use recipebox::{ClientUi, RecipeList, View};
//! # struct Ui;
//! # impl ClientUi for Ui {
//! #     fn show_auth_message(&self, _: &str) {}
//! #     fn alert(&self, _: &str) {}
//! #     fn confirm(&self, _: &str) -> bool { true }
//! #     fn prompt(&self, _: &str, d: &str) -> Option<String> { Some(d.to_string()) }
//! #     fn show_view(&self, _: View, _: Option<&str>) {}
//! #     fn show_recipes(&self, _: &RecipeList) {}
//! #     fn clear_recipe_form(&self) {}
//! #     fn show_preview(&self, _: Option<&str>) {}
//! # }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let api = HttpRecipeApi::new(config.client_config())?;
//!     let controller = Controller::new(api, Ui);
//!
//!     controller.login("alice", "secret").await?;
//!     controller.add_recipe("Pancakes", "Flour, eggs, milk", None).await?;
//!     controller.load_all_recipes().await?;
//!
//!     controller.logout().await;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod image;
pub mod logging;
pub mod models;
pub mod render;
pub mod session;

pub use client::{ClientConfig, ClientError, HttpRecipeApi, RecipeApi};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};

pub use controller::{ActionError, ClientUi, Controller, ListOutcome};

pub use image::{ImageError, ImageFile, LocalImage};

pub use models::{Credentials, LoginReply, NewRecipe, Recipe, RecipeId, RecipeUpdate, Reply, UserId};

pub use render::{escape_html, escape_js, render_recipes, CardAction, ListMode, RecipeCard, RecipeList};

pub use session::{Session, SessionUser, View};
