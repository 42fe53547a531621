//! Navigation Component
//!
//! Header navigation bar with logo, links and logout.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let authenticated = state.authenticated;
    let navigate = use_navigate();

    let on_logout = move |_| {
        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            api::logout().await;
            state.sign_out();
            state.show_success("Signed out");
            navigate("/login", Default::default());
        });
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🧠"</span>
                        <span class="text-xl font-bold text-white">"Mindu"</span>
                    </A>

                    // Navigation links
                    {move || {
                        if authenticated.get() {
                            view! {
                                <div class="flex items-center space-x-1">
                                    <NavLink href="/dashboard" label="Dashboard" />
                                    <NavLink href="/evaluate" label="Assessment" />
                                    <NavLink href="/chat" label="Chat" />
                                    <button
                                        on:click=on_logout.clone()
                                        class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-red-700 transition-colors"
                                    >
                                        "Logout"
                                    </button>
                                </div>
                            }.into_view()
                        } else {
                            view! {
                                <div class="flex items-center space-x-1">
                                    <NavLink href="/login" label="Login" />
                                    <NavLink href="/signup" label="Sign Up" />
                                </div>
                            }.into_view()
                        }
                    }}
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
