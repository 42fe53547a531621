//! Dashboard Page
//!
//! Overall score, latest breakdown and the trend across all assessments.
//! The charts sit behind tabs: trend over time, category radar and the
//! distribution of the latest scores.

use leptos::*;
use leptos_router::*;

use crate::api::{self, DashboardSummary};
use crate::components::{Loading, PieChart, RadarChart, ScoreBar, TrendChart};
use crate::state::GlobalState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let summary = create_resource(|| (), move |_| {
        let state = state.clone();
        async move {
            let result = api::fetch_dashboard().await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Failed to fetch dashboard: {}", e).into());
                state.sync_session();
            }
            result
        }
    });

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-400 mt-1">"How you've been doing over time"</p>
                </div>
                <A href="/evaluate" class="px-4 py-2 bg-violet-600 hover:bg-violet-700 rounded-lg text-sm font-medium">
                    "New Assessment"
                </A>
            </div>

            <Suspense fallback=move || view! { <Loading /> }>
                {move || summary.get().map(|result| match result {
                    Ok(Some(summary)) => view! { <SummaryView summary=summary /> }.into_view(),
                    Ok(None) => view! { <EmptyState /> }.into_view(),
                    Err(e) => view! { <p class="text-red-400">{e}</p> }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn SummaryView(summary: DashboardSummary) -> impl IntoView {
    let last_taken = chrono::DateTime::from_timestamp_millis(summary.latest_timestamp)
        .map(|dt| dt.format("%b %d, %Y").to_string())
        .unwrap_or_default();

    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <StatCard
                label="Overall Score"
                value=format!("{:.1}", summary.overall_average)
                detail=summary.band_label.clone()
            />
            <StatCard
                label="Assessments Taken"
                value=summary.assessments_taken.to_string()
                detail="All time".to_string()
            />
            <StatCard
                label="Last Assessment"
                value=last_taken
                detail="Most recent".to_string()
            />
        </div>

        <ChartTabs summary=summary.clone() />

        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Latest Breakdown"</h2>
            {summary.latest.into_iter().map(|item| view! {
                <ScoreBar title=item.title score=item.score />
            }).collect_view()}
        </section>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartTab {
    Trend,
    Radar,
    Distribution,
}

impl ChartTab {
    const ALL: [ChartTab; 3] = [ChartTab::Trend, ChartTab::Radar, ChartTab::Distribution];

    fn label(self) -> &'static str {
        match self {
            ChartTab::Trend => "Trends Over Time",
            ChartTab::Radar => "Category Profile",
            ChartTab::Distribution => "Score Distribution",
        }
    }
}

#[component]
fn ChartTabs(summary: DashboardSummary) -> impl IntoView {
    let (tab, set_tab) = create_signal(ChartTab::Trend);

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <div class="grid grid-cols-3 gap-2 bg-gray-900 rounded-lg p-1">
                {ChartTab::ALL.into_iter().map(|option| view! {
                    <button
                        on:click=move |_| set_tab.set(option)
                        class=move || if tab.get() == option {
                            "px-3 py-2 rounded-md text-sm font-medium bg-violet-600 text-white"
                        } else {
                            "px-3 py-2 rounded-md text-sm font-medium text-gray-400 hover:text-white"
                        }
                    >
                        {option.label()}
                    </button>
                }).collect_view()}
            </div>

            {move || match tab.get() {
                ChartTab::Trend => view! { <TrendChart points=summary.trend.clone() /> }.into_view(),
                ChartTab::Radar => view! { <RadarChart categories=summary.latest.clone() /> }.into_view(),
                ChartTab::Distribution => view! { <PieChart categories=summary.latest.clone() /> }.into_view(),
            }}
        </section>
    }
}

#[component]
fn StatCard(
    label: &'static str,
    #[prop(into)]
    value: String,
    #[prop(into)]
    detail: String,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-6">
            <p class="text-sm text-gray-400">{label}</p>
            <p class="text-3xl font-bold mt-2">{value}</p>
            <p class="text-sm text-gray-500 mt-1">{detail}</p>
        </div>
    }
}

#[component]
fn EmptyState() -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-12 text-center space-y-4">
            <div class="text-5xl">"📋"</div>
            <h2 class="text-xl font-semibold">"No mental health data available"</h2>
            <p class="text-gray-400">"Start tracking by completing your first assessment."</p>
            <A href="/evaluate" class="inline-block px-6 py-3 bg-violet-600 hover:bg-violet-700 rounded-lg font-medium">
                "Take Assessment"
            </A>
        </div>
    }
}
