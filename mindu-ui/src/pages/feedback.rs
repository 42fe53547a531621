//! Feedback Page
//!
//! Category breakdown of the most recent assessment plus the advisor's
//! written feedback on it.

use leptos::*;
use leptos_router::*;
use std::collections::BTreeMap;

use crate::api::{self, FeedbackReport};
use crate::components::{Loading, ScoreBar};
use crate::state::scoring::{by_title, category_title, tag_badge};
use crate::state::GlobalState;

/// Scores of the quiz just taken, or of the newest stored assessment
async fn latest_scores(state: GlobalState) -> Result<Option<BTreeMap<u8, f64>>, String> {
    if let Some(scores) = state.last_scores.get_untracked() {
        return Ok(Some(scores));
    }
    let records = api::fetch_responses().await?;
    Ok(records.into_iter().last().map(|r| r.answers))
}

#[component]
pub fn Feedback() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let scores = create_resource(|| (), move |_| latest_scores(state.clone()));

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"Your Feedback"</h1>

            <Suspense fallback=move || view! { <Loading /> }>
                {move || scores.get().map(|result| match result {
                    Ok(Some(scores)) => view! { <FeedbackView scores=scores /> }.into_view(),
                    Ok(None) => view! { <NoAssessment /> }.into_view(),
                    Err(e) => view! { <p class="text-red-400">{e}</p> }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn FeedbackView(scores: BTreeMap<u8, f64>) -> impl IntoView {
    let titled = by_title(&scores);
    let report = create_resource(
        move || titled.clone(),
        |titled| async move { api::request_feedback(&titled).await },
    );

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Category Scores"</h2>
            {scores.iter().map(|(&index, &score)| view! {
                <ScoreBar title=category_title(index) score=score />
            }).collect_view()}
        </section>

        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h2 class="text-xl font-semibold">"AI Feedback"</h2>
            <Suspense fallback=move || view! {
                <div class="text-gray-400">"Analyzing your results..."</div>
            }>
                {move || report.get().map(|result| match result {
                    Ok(response) => view! { <ReportCard report=response.report /> }.into_view(),
                    Err(_) => view! {
                        <p class="text-red-400">{api::LLM_ERROR_MESSAGE}</p>
                    }.into_view(),
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn ReportCard(report: FeedbackReport) -> impl IntoView {
    let items = report.action_items();

    view! {
        <div class="space-y-4">
            <div class="flex items-center space-x-3">
                <span class="text-sm text-gray-400">"Overall assessment:"</span>
                <span class=format!("px-3 py-1 rounded-full text-sm font-medium capitalize {}", tag_badge(&report.tag))>
                    {report.tag.clone()}
                </span>
            </div>

            <p class="text-gray-200 leading-relaxed">{report.feedback.clone()}</p>

            <div>
                <h3 class="font-semibold mb-2">"Suggested actions"</h3>
                <ul class="list-disc list-inside space-y-1 text-gray-300">
                    {items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
                </ul>
            </div>

            <p class="text-xs text-gray-500 border-t border-gray-700 pt-4">
                "This feedback is generated by AI and is not a diagnosis. \
                 If you are struggling, please reach out to a mental health professional."
            </p>
        </div>
    }
}

#[component]
fn NoAssessment() -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-8 text-center space-y-4">
            <p class="text-gray-300">"Complete an assessment to receive feedback."</p>
            <A href="/evaluate" class="inline-block px-6 py-3 bg-violet-600 hover:bg-violet-700 rounded-lg font-medium">
                "Take Assessment"
            </A>
        </div>
    }
}
