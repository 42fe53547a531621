//! Login and Signup Pages

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::InlineLoading;
use crate::state::GlobalState;
use crate::validation::{validate_login, validate_signup};

#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let email = email.get_untracked();
        let password = password.get_untracked();

        if let Err(message) = validate_login(&email, &password) {
            set_error.set(Some(message));
            return;
        }

        set_error.set(None);
        set_submitting.set(true);

        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&email, &password).await {
                Ok(session) => {
                    state.sign_in(session.user);
                    navigate("/dashboard", Default::default());
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthCard title="Welcome back" subtitle="Log in to continue your wellness journey">
            <form on:submit=on_submit class="space-y-4">
                <TextField label="Email" kind="email" value=email set_value=set_email />
                <TextField label="Password" kind="password" value=password set_value=set_password />
                <FormError error=error />
                <SubmitButton label="Log In" submitting=submitting />
            </form>
            <p class="text-sm text-gray-400 text-center mt-6">
                "Don't have an account? "
                <A href="/signup" class="text-violet-400 hover:underline">"Sign up"</A>
            </p>
        </AuthCard>
    }
}

#[component]
pub fn Signup() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let (username, set_username) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let username = username.get_untracked();
        let email = email.get_untracked();
        let password = password.get_untracked();
        let confirm = confirm.get_untracked();

        if let Err(message) = validate_signup(&username, &email, &password, &confirm) {
            set_error.set(Some(message));
            return;
        }

        set_error.set(None);
        set_submitting.set(true);

        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::signup(&username, &email, &password, &confirm).await {
                Ok(session) => {
                    state.sign_in(session.user);
                    state.show_success("Account created");
                    navigate("/evaluate", Default::default());
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthCard title="Create your account" subtitle="Start tracking how you feel">
            <form on:submit=on_submit class="space-y-4">
                <TextField label="Username" kind="text" value=username set_value=set_username />
                <TextField label="Email" kind="email" value=email set_value=set_email />
                <TextField label="Password" kind="password" value=password set_value=set_password />
                <TextField label="Confirm Password" kind="password" value=confirm set_value=set_confirm />
                <FormError error=error />
                <SubmitButton label="Sign Up" submitting=submitting />
            </form>
            <p class="text-sm text-gray-400 text-center mt-6">
                "Already have an account? "
                <A href="/login" class="text-violet-400 hover:underline">"Log in"</A>
            </p>
        </AuthCard>
    }
}

#[component]
fn AuthCard(
    title: &'static str,
    subtitle: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="max-w-md mx-auto bg-gray-800 rounded-xl p-8 mt-8">
            <h1 class="text-2xl font-bold mb-1">{title}</h1>
            <p class="text-gray-400 mb-6">{subtitle}</p>
            {children()}
        </div>
    }
}

#[component]
fn TextField(
    label: &'static str,
    kind: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="text-sm text-gray-300">{label}</span>
            <input
                type=kind
                prop:value=value
                on:input=move |ev| set_value.set(event_target_value(&ev))
                class="mt-1 w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2 focus:outline-none focus:border-violet-500"
            />
        </label>
    }
}

#[component]
fn FormError(error: ReadSignal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|message| view! {
            <p class="text-sm text-red-400">{message}</p>
        })
    }
}

#[component]
fn SubmitButton(label: &'static str, submitting: ReadSignal<bool>) -> impl IntoView {
    view! {
        <button
            type="submit"
            disabled=move || submitting.get()
            class="w-full py-3 bg-violet-600 hover:bg-violet-700 disabled:opacity-50 rounded-lg font-medium transition-colors"
        >
            {move || if submitting.get() {
                view! { <InlineLoading /> }.into_view()
            } else {
                label.into_view()
            }}
        </button>
    }
}
