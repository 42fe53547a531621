//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;
use std::collections::BTreeMap;

use crate::api::{self, User};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Signed-in user, once `/auth/me` has answered
    pub user: RwSignal<Option<User>>,
    /// Whether a session token is stored
    pub authenticated: RwSignal<bool>,
    /// Scores of the assessment just completed, handed to the feedback page
    pub last_scores: RwSignal<Option<BTreeMap<u8, f64>>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        user: create_rw_signal(None),
        authenticated: create_rw_signal(api::get_token().is_some()),
        last_scores: create_rw_signal(None),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Record a fresh login
    pub fn sign_in(&self, user: User) {
        self.user.set(Some(user));
        self.authenticated.set(true);
    }

    /// Drop all per-user state
    pub fn sign_out(&self) {
        api::clear_token();
        self.user.set(None);
        self.last_scores.set(None);
        self.authenticated.set(false);
    }

    /// Re-read the token after a request may have cleared it
    pub fn sync_session(&self) {
        if api::get_token().is_none() && self.authenticated.get_untracked() {
            self.sign_out();
        }
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        }).forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }
}
