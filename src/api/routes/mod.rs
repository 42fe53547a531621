//! API Routes
//!
//! Route handlers organized by functionality.

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod feedback;
pub mod health;
pub mod questions;
pub mod responses;
