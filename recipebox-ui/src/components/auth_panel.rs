//! Auth Panel Component
//!
//! Register and login forms with an inline status message.

use leptos::*;

use crate::api;
use crate::state::global::{
    GlobalState, SessionUser, MSG_ENTER_CREDENTIALS, MSG_ERROR, MSG_INVALID_CREDENTIALS,
    MSG_REGISTERED, MSG_SERVER_ERROR,
};

/// Trimmed credentials, or `None` when either field is blank
fn credentials(username: &str, password: &str) -> Option<(String, String)> {
    let username = username.trim();
    let password = password.trim();
    if username.is_empty() || password.is_empty() {
        None
    } else {
        Some((username.to_string(), password.to_string()))
    }
}

#[component]
pub fn AuthPanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (reg_username, set_reg_username) = create_signal(String::new());
    let (reg_password, set_reg_password) = create_signal(String::new());
    let (login_username, set_login_username) = create_signal(String::new());
    let (login_password, set_login_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let state_register = state.clone();
    let on_register = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let state = state_register.clone();
        state.auth_message.set(String::new());

        let Some((username, password)) = credentials(&reg_username.get(), &reg_password.get())
        else {
            state.auth_message.set(MSG_ENTER_CREDENTIALS.to_string());
            return;
        };

        set_submitting.set(true);
        spawn_local(async move {
            let message = match api::register(&username, &password).await {
                Ok(reply) => reply.message.unwrap_or_else(|| MSG_REGISTERED.to_string()),
                Err(e) => e.message_or(MSG_ERROR, MSG_SERVER_ERROR),
            };
            state.auth_message.set(message);
            set_submitting.set(false);
        });
    };

    let state_login = state.clone();
    let on_login = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let state = state_login.clone();
        state.auth_message.set(String::new());

        let Some((username, password)) =
            credentials(&login_username.get(), &login_password.get())
        else {
            state.auth_message.set(MSG_ENTER_CREDENTIALS.to_string());
            return;
        };

        set_submitting.set(true);
        spawn_local(async move {
            match api::login(&username, &password).await {
                Ok(api::LoginReply {
                    user_id: Some(user_id),
                    ..
                }) => state.login(SessionUser { user_id, username }),
                Ok(reply) => state.auth_message.set(
                    reply
                        .message
                        .unwrap_or_else(|| MSG_INVALID_CREDENTIALS.to_string()),
                ),
                Err(e) => state
                    .auth_message
                    .set(e.message_or(MSG_INVALID_CREDENTIALS, MSG_SERVER_ERROR)),
            }
            set_submitting.set(false);
        });
    };

    let input_class = "w-full bg-gray-700 rounded-lg px-4 py-3 text-white \
                       border border-gray-600 focus:border-primary-500 focus:outline-none";
    let button_class = "w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 \
                        rounded-lg py-3 font-semibold transition-colors";

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <div class="grid gap-6 md:grid-cols-2">
                <form on:submit=on_register class="bg-gray-800 rounded-xl p-6 space-y-4">
                    <h2 class="text-xl font-semibold">"Register"</h2>
                    <input
                        type="text"
                        placeholder="Username"
                        class=input_class
                        prop:value=move || reg_username.get()
                        on:input=move |ev| set_reg_username.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        class=input_class
                        prop:value=move || reg_password.get()
                        on:input=move |ev| set_reg_password.set(event_target_value(&ev))
                    />
                    <button type="submit" class=button_class disabled=move || submitting.get()>
                        "Register"
                    </button>
                </form>

                <form on:submit=on_login class="bg-gray-800 rounded-xl p-6 space-y-4">
                    <h2 class="text-xl font-semibold">"Login"</h2>
                    <input
                        type="text"
                        placeholder="Username"
                        class=input_class
                        prop:value=move || login_username.get()
                        on:input=move |ev| set_login_username.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        class=input_class
                        prop:value=move || login_password.get()
                        on:input=move |ev| set_login_password.set(event_target_value(&ev))
                    />
                    <button type="submit" class=button_class disabled=move || submitting.get()>
                        "Login"
                    </button>
                </form>
            </div>

            <p class="text-center text-gray-300 min-h-[1.5rem]">
                {move || state.auth_message.get()}
            </p>
        </div>
    }
}
