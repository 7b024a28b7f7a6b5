//! Navigation Component
//!
//! Header with the brand, the welcome line and logout.

use leptos::*;

use crate::state::global::GlobalState;

#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let state_logout = state.clone();

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <div class="flex items-center space-x-3">
                        <span class="text-2xl">"🍲"</span>
                        <span class="text-xl font-bold text-white">"RecipeBox"</span>
                    </div>

                    {move || {
                        state.user.get().map(|user| {
                            let state = state_logout.clone();
                            view! {
                                <div class="flex items-center space-x-4">
                                    <span class="text-gray-300">{user.welcome_line()}</span>
                                    <button
                                        class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                                        on:click=move |_| state.logout()
                                    >
                                        "Logout"
                                    </button>
                                </div>
                            }
                        })
                    }}
                </div>
            </div>
        </nav>
    }
}
