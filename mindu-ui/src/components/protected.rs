//! Route guard: pages behind a login.

use leptos::*;
use leptos_router::*;

use crate::state::GlobalState;

/// Render children only while a session token is stored
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    state.sync_session();
    let authenticated = state.authenticated;

    move || {
        if authenticated.get() {
            children().into_view()
        } else {
            view! { <Redirect path="/login" /> }.into_view()
        }
    }
}
