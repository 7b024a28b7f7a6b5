//! API Client Module
//!
//! HTTP client for the RecipeBox REST API.

mod client;

pub use client::*;
