//! Chat Page
//!
//! Conversation with the wellness advisor. Each message is sent on its
//! own; the advisor keeps no memory between turns. Advisor replies are
//! rendered as markdown.

use leptos::*;

use crate::api;
use crate::components::Thinking;
use crate::markdown::render_markdown;

const STARTER_QUESTIONS: [&str; 3] = [
    "How are you feeling today?",
    "What made you smile recently?",
    "Is there something bothering you?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sender {
    User,
    Advisor,
}

#[derive(Debug, Clone)]
struct Message {
    id: usize,
    sender: Sender,
    text: String,
}

#[component]
pub fn Chat() -> impl IntoView {
    let messages = create_rw_signal(Vec::<Message>::new());
    let (input, set_input) = create_signal(String::new());
    let (thinking, set_thinking) = create_signal(false);

    let push = move |sender: Sender, text: String| {
        messages.update(|m| {
            let id = m.len();
            m.push(Message { id, sender, text });
        });
    };

    let send = move || {
        let query = input.get_untracked();
        if query.trim().is_empty() || thinking.get_untracked() {
            return;
        }

        push(Sender::User, query.clone());
        set_input.set(String::new());
        set_thinking.set(true);

        spawn_local(async move {
            let reply = match api::send_chat(&query).await {
                Ok(reply) => reply,
                Err(e) => {
                    web_sys::console::error_1(&format!("Chat failed: {}", e).into());
                    api::LLM_ERROR_MESSAGE.to_string()
                }
            };
            push(Sender::Advisor, reply);
            set_thinking.set(false);
        });
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        send();
    };

    view! {
        <div class="max-w-3xl mx-auto flex flex-col h-[70vh] bg-gray-800 rounded-xl">
            <div class="p-4 border-b border-gray-700">
                <h1 class="text-xl font-bold">"Wellness Advisor"</h1>
                <p class="text-sm text-gray-400">"Share what's on your mind."</p>
            </div>

            <div class="flex-1 overflow-y-auto p-4 space-y-3">
                {move || {
                    if messages.with(Vec::is_empty) {
                        view! {
                            <div class="space-y-2">
                                <p class="text-gray-400 text-sm">"Try one of these to get started:"</p>
                                {STARTER_QUESTIONS.into_iter().map(|question| view! {
                                    <button
                                        on:click=move |_| set_input.set(question.to_string())
                                        class="block w-full text-left px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm"
                                    >
                                        {question}
                                    </button>
                                }).collect_view()}
                            </div>
                        }.into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}

                <For
                    each=move || messages.get()
                    key=|message| message.id
                    children=|message| view! { <Bubble message=message /> }
                />

                {move || thinking.get().then(|| view! { <Thinking /> })}
            </div>

            <form on:submit=on_submit class="p-4 border-t border-gray-700 flex space-x-2">
                <input
                    type="text"
                    placeholder="Type your message here..."
                    prop:value=input
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    class="flex-1 bg-gray-700 border border-gray-600 rounded-lg px-3 py-2 focus:outline-none focus:border-violet-500"
                />
                <button
                    type="submit"
                    disabled=move || thinking.get() || input.get().trim().is_empty()
                    class="px-5 py-2 bg-violet-600 hover:bg-violet-700 disabled:opacity-50 rounded-lg font-medium"
                >
                    "Send"
                </button>
            </form>
        </div>
    }
}

#[component]
fn Bubble(message: Message) -> impl IntoView {
    match message.sender {
        Sender::User => view! {
            <div class="flex justify-end">
                <div class="max-w-[80%] px-4 py-2 rounded-lg whitespace-pre-wrap bg-violet-600 text-white">
                    {message.text}
                </div>
            </div>
        },
        Sender::Advisor => view! {
            <div class="flex justify-start">
                <div
                    class="advisor-reply max-w-[80%] px-4 py-2 rounded-lg space-y-2 bg-gray-700 text-gray-100"
                    inner_html=render_markdown(&message.text)
                />
            </div>
        },
    }
}
