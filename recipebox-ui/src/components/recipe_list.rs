//! Recipe List Component
//!
//! Recipe cards. Text goes through Leptos text nodes, so titles and
//! descriptions are never parsed as markup; controls carry the recipe id
//! instead of inline handlers.

use leptos::*;

use crate::api::{self, Recipe};
use crate::state::global::{GlobalState, MSG_ADD_TITLE, MSG_DELETED, MSG_LOGIN_REQUIRED, MSG_UPDATED};

pub const EMPTY_PLACEHOLDER: &str = "No recipes found.";

/// `window.prompt`, `None` when cancelled
fn prompt(question: &str, default: &str) -> Option<String> {
    web_sys::window()?
        .prompt_with_message_and_default(question, default)
        .ok()
        .flatten()
}

fn confirm(question: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(question).ok())
        .unwrap_or(false)
}

fn edit(state: GlobalState, recipe: Recipe) {
    let Some(title) = prompt("Edit title:", &recipe.title) else {
        return;
    };
    let Some(description) = prompt("Edit description:", recipe.description()) else {
        return;
    };
    let title = title.trim().to_string();
    if title.is_empty() {
        state.show_error(MSG_ADD_TITLE);
        return;
    }
    let Some(user_id) = state.user_id() else {
        state.show_error(MSG_LOGIN_REQUIRED);
        return;
    };

    let epoch = state.session_epoch();

    spawn_local(async move {
        let result = api::edit_recipe(recipe.id, user_id, &title, description.trim()).await;
        state.finish_mutation(result, MSG_UPDATED, epoch);
    });
}

fn delete(state: GlobalState, id: i64) {
    if !confirm("Delete this recipe?") {
        return;
    }
    let Some(user_id) = state.user_id() else {
        state.show_error(MSG_LOGIN_REQUIRED);
        return;
    };

    let epoch = state.session_epoch();

    spawn_local(async move {
        let result = api::delete_recipe(id, user_id).await;
        state.finish_mutation(result, MSG_DELETED, epoch);
    });
}

#[component]
pub fn RecipeList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div id="recipes" class="grid gap-4 md:grid-cols-2">
            {move || {
                let recipes = state.recipes.get();
                if recipes.is_empty() {
                    return view! {
                        <p class="muted text-gray-400">{EMPTY_PLACEHOLDER}</p>
                    }
                    .into_view();
                }
                let owner_view = state.owner_view.get();
                recipes
                    .into_iter()
                    .map(|recipe| view! { <RecipeCard recipe=recipe owner_view=owner_view /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn RecipeCard(recipe: Recipe, owner_view: bool) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let image = recipe.image_src().map(|src| {
        view! { <img src=src.to_string() alt="" class="w-full max-h-64 object-cover rounded-lg" /> }
    });
    let owner_line = recipe
        .owner_line()
        .map(|line| view! { <p class="text-sm text-gray-400">{line}</p> });

    let controls = owner_view.then(|| {
        let id = recipe.id;
        let for_edit = recipe.clone();
        let state_edit = state.clone();
        let state_delete = state.clone();
        view! {
            <div class="flex space-x-2 pt-2">
                <button
                    data-action="edit"
                    data-recipe-id=id
                    class="px-3 py-1 rounded-lg bg-gray-700 hover:bg-gray-600 text-sm"
                    on:click=move |_| edit(state_edit.clone(), for_edit.clone())
                >
                    "Edit"
                </button>
                <button
                    data-action="delete"
                    data-recipe-id=id
                    class="px-3 py-1 rounded-lg bg-red-700 hover:bg-red-600 text-sm"
                    on:click=move |_| delete(state_delete.clone(), id)
                >
                    "Delete"
                </button>
            </div>
        }
    });

    view! {
        <article class="card bg-gray-800 rounded-xl p-4 space-y-2" data-recipe-id=recipe.id>
            <h3 class="text-lg font-semibold">{recipe.title.clone()}</h3>
            {owner_line}
            {image}
            <p class="text-gray-300 whitespace-pre-line">{recipe.description().to_string()}</p>
            {controls}
        </article>
    }
}
