//! App Root Component
//!
//! Switches between the auth view and the recipe view based on the session.

use leptos::*;

use crate::components::{AuthPanel, Nav, RecipeForm, RecipeList, Toast};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <Nav />

            <main class="flex-1 container mx-auto px-4 py-8">
                {move || {
                    if state.is_authenticated() {
                        view! { <RecipesView /> }.into_view()
                    } else {
                        view! { <AuthPanel /> }.into_view()
                    }
                }}
            </main>

            <Toast />
        </div>
    }
}

/// Recipe view: add form on the left, listing on the right
#[component]
fn RecipesView() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_all = state.clone();
    let state_mine = state.clone();

    view! {
        <div class="grid gap-8 md:grid-cols-3">
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Add a recipe"</h2>
                <RecipeForm />
            </section>

            <section class="md:col-span-2 space-y-4">
                <div class="flex space-x-2">
                    <button
                        class="px-4 py-2 rounded-lg bg-gray-700 hover:bg-gray-600 transition-colors"
                        on:click=move |_| state_all.load_all()
                    >
                        "All recipes"
                    </button>
                    <button
                        class="px-4 py-2 rounded-lg bg-gray-700 hover:bg-gray-600 transition-colors"
                        on:click=move |_| state_mine.load_mine()
                    >
                        "My recipes"
                    </button>
                    {move || {
                        state.loading.get().then(|| view! {
                            <div class="loading-spinner w-5 h-5 self-center" />
                        })
                    }}
                </div>

                <RecipeList />
            </section>
        </div>
    }
}
