//! State Management
//!
//! Global application state and score helpers.

pub mod global;
pub mod scoring;

pub use global::{provide_global_state, GlobalState};
