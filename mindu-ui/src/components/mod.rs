//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod nav;
pub mod chart;
pub mod loading;
pub mod protected;
pub mod score_bar;
pub mod toast;

pub use nav::Nav;
pub use chart::{PieChart, RadarChart, TrendChart};
pub use loading::{InlineLoading, Loading, Thinking};
pub use protected::RequireAuth;
pub use score_bar::ScoreBar;
pub use toast::Toast;
