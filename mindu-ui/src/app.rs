//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Nav, RequireAuth, Toast};
use crate::pages::{Chat, Dashboard, Evaluate, Feedback, Login, Signup};
use crate::state::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    // Resolve the stored token to a user once on startup
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    if state.authenticated.get_untracked() {
        spawn_local(async move {
            match api::fetch_me().await {
                Ok(user) => state.sign_in(user),
                Err(_) => state.sync_session(),
            }
        });
    }

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/login" view=Login />
                        <Route path="/signup" view=Signup />
                        <Route path="/dashboard" view=|| view! { <RequireAuth><Dashboard /></RequireAuth> } />
                        <Route path="/evaluate" view=|| view! { <RequireAuth><Evaluate /></RequireAuth> } />
                        <Route path="/feedback" view=|| view! { <RequireAuth><Feedback /></RequireAuth> } />
                        <Route path="/chat" view=|| view! { <RequireAuth><Chat /></RequireAuth> } />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />

                <Toast />
            </div>
        </Router>
    }
}

/// Landing route: dashboard when signed in, login otherwise
#[component]
fn Home() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    move || {
        if state.authenticated.get() {
            view! { <Redirect path="/dashboard" /> }.into_view()
        } else {
            view! { <Redirect path="/login" /> }.into_view()
        }
    }
}

#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm text-gray-400">
                <span>"Mindu is not a substitute for professional care."</span>
                {move || {
                    state.user.get().map(|user| view! {
                        <span>{format!("Signed in as {}", user.username)}</span>
                    })
                }}
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-violet-600 hover:bg-violet-700 rounded-lg font-medium transition-colors"
            >
                "Go Home"
            </A>
        </div>
    }
}
