//! Toast Notification Component
//!
//! Transient success and error notices, dismissable by click.

use leptos::*;

use crate::state::GlobalState;

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (success, error) = (state.success, state.error);

    view! {
        <div class="fixed bottom-20 right-4 z-50 space-y-2">
            {move || success.get().map(|text| view! {
                <Notice text=text tone="bg-green-600" icon="✓" on_dismiss=move || success.set(None) />
            })}
            {move || error.get().map(|text| view! {
                <Notice text=text tone="bg-red-600" icon="!" on_dismiss=move || error.set(None) />
            })}
        </div>
    }
}

#[component]
fn Notice(
    text: String,
    tone: &'static str,
    icon: &'static str,
    on_dismiss: impl Fn() + 'static,
) -> impl IntoView {
    view! {
        <button
            on:click=move |_| on_dismiss()
            class=format!("flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg text-left", tone)
        >
            <span class="font-bold">{icon}</span>
            <span class="text-sm">{text}</span>
        </button>
    }
}
