//! API access
//!
//! HTTP client for the Mindu REST API plus session token storage.

pub mod client;

pub use client::*;
