//! RecipeBox
//!
//! Browser front end for the RecipeBox recipe-sharing service, built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - Register and log in
//! - Browse everyone's recipes or just your own
//! - Add recipes with an optional photo, edit and delete your own
//!
//! # Architecture
//!
//! A client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! It talks to the RecipeBox REST API over HTTP on the page's own origin.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
