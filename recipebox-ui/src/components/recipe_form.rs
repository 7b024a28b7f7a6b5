//! Recipe Form Component
//!
//! Title, description and an optional photo with a live preview.

use leptos::*;
use wasm_bindgen_futures::JsFuture;

use crate::api::{self, NewRecipe};
use crate::state::global::{
    GlobalState, MSG_ADDED, MSG_ADD_TITLE, MSG_ERROR, MSG_LOGIN_REQUIRED, MSG_SERVER_ERROR,
};

/// Read an image file as a `data:image/...` URI; empty or non-image files are an error
pub async fn read_data_url(file: &web_sys::File) -> Result<String, String> {
    let reader = web_sys::FileReader::new().map_err(|_| "FileReader unavailable".to_string())?;

    // The executor runs synchronously, so both handlers are set before reading starts
    let done = js_sys::Promise::new(&mut |resolve, reject| {
        reader.set_onload(Some(&resolve));
        reader.set_onerror(Some(&reject));
    });
    reader
        .read_as_data_url(file)
        .map_err(|_| format!("Could not read {}", file.name()))?;
    JsFuture::from(done)
        .await
        .map_err(|_| format!("Could not read {}", file.name()))?;

    let url = reader
        .result()
        .ok()
        .and_then(|value| value.as_string())
        .filter(|url| !is_empty_data_url(url))
        .ok_or_else(|| format!("{} is empty", file.name()))?;

    // Listings only display data:image/ sources
    if !url.starts_with("data:image/") {
        return Err(format!("{} is not an image", file.name()));
    }
    Ok(url)
}

/// Browsers give `data:` or `data:<mime>;base64,` for an empty file
fn is_empty_data_url(url: &str) -> bool {
    url.split_once(',').map_or(true, |(_, data)| data.is_empty())
}

fn selected_file(input: &NodeRef<html::Input>) -> Option<web_sys::File> {
    input.get_untracked()?.files()?.get(0)
}

#[component]
pub fn RecipeForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (title, set_title) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (preview, set_preview) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);
    let file_input = create_node_ref::<html::Input>();

    let on_file_change = move |_ev: web_sys::Event| {
        let Some(file) = selected_file(&file_input) else {
            set_preview.set(None);
            return;
        };
        spawn_local(async move {
            match read_data_url(&file).await {
                Ok(url) => set_preview.set(Some(url)),
                Err(e) => web_sys::console::warn_1(&e.into()),
            }
        });
    };

    let clear_form = move || {
        set_title.set(String::new());
        set_description.set(String::new());
        set_preview.set(None);
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let state = state.clone();

        let Some(owner_id) = state.user_id() else {
            state.show_error(MSG_LOGIN_REQUIRED);
            return;
        };
        let recipe_title = title.get().trim().to_string();
        if recipe_title.is_empty() {
            state.show_error(MSG_ADD_TITLE);
            return;
        }
        let recipe_description = description.get().trim().to_string();
        let file = selected_file(&file_input);
        let epoch = state.session_epoch();

        set_submitting.set(true);
        spawn_local(async move {
            let image_base64 = match file {
                Some(file) => match read_data_url(&file).await {
                    Ok(url) => Some(url),
                    Err(e) => {
                        web_sys::console::warn_1(&format!("Skipping image: {}", e).into());
                        None
                    }
                },
                None => None,
            };

            let recipe = NewRecipe {
                title: recipe_title,
                description: recipe_description,
                owner_id,
                image_base64,
            };

            match api::add_recipe(&recipe).await {
                Ok(reply) => {
                    state.show_success(reply.message.as_deref().unwrap_or(MSG_ADDED));
                    clear_form();
                    state.reload_after(epoch);
                }
                // Form keeps its contents so the user can retry
                Err(e) => state.show_error(&e.message_or(MSG_ERROR, MSG_SERVER_ERROR)),
            }
            set_submitting.set(false);
        });
    };

    let input_class = "w-full bg-gray-700 rounded-lg px-4 py-3 text-white \
                       border border-gray-600 focus:border-primary-500 focus:outline-none";

    view! {
        <form on:submit=on_submit class="space-y-4">
            <input
                type="text"
                placeholder="Title"
                class=input_class
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <textarea
                placeholder="Description"
                rows="4"
                class=input_class
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <input
                type="file"
                accept="image/*"
                node_ref=file_input
                class="block w-full text-sm text-gray-400"
                on:change=on_file_change
            />
            {move || {
                preview.get().map(|src| view! {
                    <img src=src alt="Preview" class="max-h-48 rounded-lg" />
                })
            }}
            <button
                type="submit"
                disabled=move || submitting.get()
                class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 \
                       rounded-lg py-3 font-semibold transition-colors"
            >
                {move || if submitting.get() { "Saving..." } else { "Add recipe" }}
            </button>
        </form>
    }
}
