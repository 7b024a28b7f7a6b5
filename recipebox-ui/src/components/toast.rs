//! Notices for recipe actions ("Added", "Recipe deleted", "Server error", ...).
//! Each one clears itself on a timer or when clicked.

use leptos::*;

use crate::state::global::GlobalState;

#[derive(Clone, Copy, PartialEq, Debug)]
enum Notice {
    Done,
    Failed,
}

impl Notice {
    fn classes(self) -> &'static str {
        match self {
            Notice::Done => "border-green-500 bg-green-900/80 text-green-100",
            Notice::Failed => "border-red-500 bg-red-900/80 text-red-100",
        }
    }

    /// Errors interrupt screen readers, confirmations wait their turn
    fn role(self) -> &'static str {
        match self {
            Notice::Done => "status",
            Notice::Failed => "alert",
        }
    }
}

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (success, error) = (state.success, state.error);

    view! {
        <div class="fixed top-20 inset-x-0 z-50 flex flex-col items-center space-y-2 pointer-events-none">
            {move || error.get().map(|text| view! {
                <NoticeBar text=text kind=Notice::Failed on_dismiss=move || error.set(None) />
            })}
            {move || success.get().map(|text| view! {
                <NoticeBar text=text kind=Notice::Done on_dismiss=move || success.set(None) />
            })}
        </div>
    }
}

#[component]
fn NoticeBar(
    #[prop(into)] text: String,
    kind: Notice,
    on_dismiss: impl Fn() + 'static,
) -> impl IntoView {
    view! {
        <button
            type="button"
            role=kind.role()
            title="Dismiss"
            class=format!(
                "pointer-events-auto border-l-4 rounded-md px-5 py-2 shadow text-sm {}",
                kind.classes()
            )
            on:click=move |_| on_dismiss()
        >
            {text}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_failures_use_alert_role() {
        assert_eq!(Notice::Failed.role(), "alert");
        assert_eq!(Notice::Done.role(), "status");
        assert_ne!(Notice::Done.classes(), Notice::Failed.classes());
    }
}
