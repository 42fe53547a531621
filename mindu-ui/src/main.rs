//! Mindu Web App
//!
//! Mental-wellness self-assessment frontend built with Leptos (WASM).
//!
//! # Features
//!
//! - Account signup and login
//! - Five-part wellness assessment
//! - Score dashboard with trend chart
//! - AI feedback on results and an advisor chat
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the Mindu API over HTTP with a bearer token kept
//! in local storage.

use leptos::*;

mod api;
mod app;
mod components;
mod markdown;
mod pages;
mod state;
mod validation;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
