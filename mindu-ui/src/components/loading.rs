//! Loading Component
//!
//! Spinners and the advisor's thinking indicator.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}

/// Chat bubble shown while waiting on the advisor
#[component]
pub fn Thinking() -> impl IntoView {
    view! {
        <div class="flex items-center space-x-2 text-gray-400 text-sm">
            <InlineLoading />
            <span>"Thinking..."</span>
        </div>
    }
}
