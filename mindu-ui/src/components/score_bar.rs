//! Score Bar Component
//!
//! Labelled 1-5 progress bar for one category.

use leptos::*;

use crate::state::scoring::{band_color, band_label};

#[component]
pub fn ScoreBar(
    #[prop(into)]
    title: String,
    score: f64,
) -> impl IntoView {
    let width = (score / 5.0 * 100.0).clamp(0.0, 100.0);

    view! {
        <div class="space-y-1">
            <div class="flex justify-between text-sm">
                <span class="text-gray-200">{title}</span>
                <span class="text-gray-400">
                    {format!("{:.1}/5 · {}", score, band_label(score))}
                </span>
            </div>
            <div class="h-3 bg-gray-700 rounded-full overflow-hidden">
                <div
                    class=format!("h-full rounded-full {}", band_color(score))
                    style=format!("width: {:.0}%", width)
                />
            </div>
        </div>
    }
}
