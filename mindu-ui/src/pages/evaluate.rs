//! Evaluate Page
//!
//! The five-page assessment. Each page is one category; the next page only
//! unlocks once every statement on the current one has an answer. The last
//! page submits the raw answers and shows the per-category results.

use leptos::*;
use leptos_router::*;

use crate::api::{self, AnswerSheet, QuestionBank, QuestionSet, ResponseRecord};
use crate::components::{InlineLoading, Loading, ScoreBar};
use crate::state::scoring::{average, band_label, category_title, round1};
use crate::state::GlobalState;

#[component]
pub fn Evaluate() -> impl IntoView {
    let bank = create_resource(|| (), |_| async move { api::fetch_questions().await });

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Wellness Assessment"</h1>
                <p class="text-gray-400 mt-1">
                    "Rate how often each statement applies to you."
                </p>
            </div>

            <Suspense fallback=move || view! { <Loading /> }>
                {move || bank.get().map(|result| match result {
                    Ok(bank) => view! { <Quiz bank=bank /> }.into_view(),
                    Err(e) => view! {
                        <p class="text-red-400">{format!("Could not load questions: {}", e)}</p>
                    }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn Quiz(bank: QuestionBank) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let total = bank.sets.len();
    let sets = store_value(bank.sets);
    let scale = store_value(bank.scale);

    let page = create_rw_signal(0usize);
    let answers = create_rw_signal(AnswerSheet::new());
    let result = create_rw_signal(None::<ResponseRecord>);
    let (submitting, set_submitting) = create_signal(false);

    let current = move || sets.with_value(|s| s[page.get()].clone());
    let page_complete = move || {
        let set = current();
        answers.with(|a| {
            a.get(&set.index)
                .map(|answered| set.questions.iter().all(|q| answered.contains_key(&q.id)))
                .unwrap_or(false)
        })
    };
    let is_last = move || page.get() + 1 == total;

    let on_next = move |_| {
        if page_complete() && !is_last() {
            page.update(|p| *p += 1);
        }
    };

    let on_results = move |_| {
        if !page_complete() {
            return;
        }
        set_submitting.set(true);
        let state = state.clone();
        let sheet = answers.get_untracked();
        spawn_local(async move {
            match api::submit_answers(&sheet).await {
                Ok(record) => {
                    state.last_scores.set(Some(record.answers.clone()));
                    result.set(Some(record));
                }
                Err(e) => {
                    state.sync_session();
                    state.show_error(&e);
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        {move || match result.get() {
            Some(record) => view! { <Results record=record /> }.into_view(),
            None => view! {
                <div class="space-y-6">
                    // Progress
                    <div>
                        <div class="flex justify-between text-sm text-gray-400 mb-1">
                            <span>{move || format!("Set {} of {}", page.get() + 1, total)}</span>
                            <span>{move || format!("{:.0}%", (page.get() + 1) as f64 / total as f64 * 100.0)}</span>
                        </div>
                        <div class="h-2 bg-gray-700 rounded-full overflow-hidden">
                            <div
                                class="h-full bg-violet-500 transition-all"
                                style=move || format!("width: {:.0}%", (page.get() + 1) as f64 / total as f64 * 100.0)
                            />
                        </div>
                    </div>

                    {move || {
                        let set = current();
                        view! { <QuestionPage set=set answers=answers scale_max=scale.with_value(|s| s.max) /> }
                    }}

                    <div class="flex justify-between text-xs text-gray-500">
                        <span>{scale.with_value(|s| format!("{} = {}", s.min, s.min_label))}</span>
                        <span>{scale.with_value(|s| format!("{} = {}", s.max, s.max_label))}</span>
                    </div>

                    <div class="flex justify-end">
                        {move || if is_last() {
                            view! {
                                <button
                                    on:click=on_results.clone()
                                    disabled=move || !page_complete() || submitting.get()
                                    class="px-6 py-3 bg-violet-600 hover:bg-violet-700 disabled:opacity-50 rounded-lg font-medium"
                                >
                                    {move || if submitting.get() {
                                        view! { <InlineLoading /> }.into_view()
                                    } else {
                                        "See Results".into_view()
                                    }}
                                </button>
                            }.into_view()
                        } else {
                            view! {
                                <button
                                    on:click=on_next
                                    disabled=move || !page_complete()
                                    class="px-6 py-3 bg-violet-600 hover:bg-violet-700 disabled:opacity-50 rounded-lg font-medium"
                                >
                                    "Next Set"
                                </button>
                            }.into_view()
                        }}
                    </div>
                </div>
            }.into_view(),
        }}
    }
}

#[component]
fn QuestionPage(set: QuestionSet, answers: RwSignal<AnswerSheet>, scale_max: u8) -> impl IntoView {
    let category = set.index;

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-6">
            <h2 class="text-xl font-semibold">{set.title.clone()}</h2>
            {set.questions.into_iter().map(|question| {
                let id = question.id;
                view! {
                    <div class="space-y-2">
                        <p>{format!("{}. {}", id, question.text)}</p>
                        <div class="flex space-x-2">
                            {(1..=scale_max).map(|value| {
                                let selected = move || answers.with(|a| {
                                    a.get(&category).and_then(|q| q.get(&id)).copied() == Some(value)
                                });
                                view! {
                                    <button
                                        on:click=move |_| answers.update(|a| {
                                            a.entry(category).or_default().insert(id, value);
                                        })
                                        class=move || if selected() {
                                            "w-10 h-10 rounded-full bg-violet-600 text-white font-semibold"
                                        } else {
                                            "w-10 h-10 rounded-full bg-gray-700 text-gray-300 hover:bg-gray-600"
                                        }
                                    >
                                        {value}
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                    </div>
                }
            }).collect_view()}
        </section>
    }
}

#[component]
fn Results(record: ResponseRecord) -> impl IntoView {
    let navigate = use_navigate();
    let overall = average(&record.answers);

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-6">
            <div>
                <h2 class="text-2xl font-semibold">"Your Results"</h2>
                <p class="text-gray-400 mt-1">
                    {format!("Overall {:.1}/5 · {}", round1(overall), band_label(overall))}
                </p>
            </div>

            <div class="space-y-4">
                {record.answers.iter().map(|(&index, &score)| view! {
                    <ScoreBar title=category_title(index) score=score />
                }).collect_view()}
            </div>

            <div class="flex justify-end space-x-3">
                <A href="/dashboard" class="px-6 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium">
                    "Dashboard"
                </A>
                <button
                    on:click=move |_| navigate("/feedback", Default::default())
                    class="px-6 py-3 bg-violet-600 hover:bg-violet-700 rounded-lg font-medium"
                >
                    "Get Feedback"
                </button>
            </div>
        </section>
    }
}
