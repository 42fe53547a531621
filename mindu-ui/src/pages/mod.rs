//! Pages
//!
//! Top-level page components for each route.

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod evaluate;
pub mod feedback;

pub use auth::{Login, Signup};
pub use chat::Chat;
pub use dashboard::Dashboard;
pub use evaluate::Evaluate;
pub use feedback::Feedback;
