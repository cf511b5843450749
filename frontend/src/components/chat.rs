use leptos::ev;
use leptos::prelude::*;

use doc_chat::markdown::html::to_html;
use doc_chat::models::{Message, Sender};

use crate::state::AppState;

/// Main chat area with message history and input.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let messages_ref = NodeRef::<leptos::html::Main>::new();

    // Keep the newest message in view when one is appended or filled in.
    Effect::new(move || {
        let _ = state
            .session
            .with(|s| (s.messages.len(), s.last_message().map(|m| m.text.len())));
        if let Some(el) = messages_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    view! {
        <main class="messages-container" node_ref=messages_ref>
            // A bubble is rebuilt only when its text or spinner state changes.
            <For
                each=move || {
                    state.session.with(|s| {
                        s.messages
                            .iter()
                            .map(|msg| (msg.clone(), s.is_pending_placeholder(msg)))
                            .collect::<Vec<_>>()
                    })
                }
                key=|(msg, pending)| (msg.id.clone(), msg.text.clone(), *pending)
                children=move |(message, pending)| {
                    view! { <MessageBubble message=message pending=pending /> }
                }
            />
        </main>
        <ChatInput />
    }
}

/// A single chat message bubble; the text is rendered as markdown.
#[component]
fn MessageBubble(message: Message, pending: bool) -> impl IntoView {
    let css_class = match message.sender {
        Sender::User => "message user",
        Sender::Ai => "message ai",
    };

    let body = if pending {
        view! { <div class="spinner" aria-label="Načítání"></div> }.into_any()
    } else {
        let rendered = to_html(&message.text);
        view! { <div class="prose" inner_html=rendered></div> }.into_any()
    };

    view! {
        <div class=css_class>
            <div class="role-label">{message.sender.as_str()}</div>
            <div class="bubble">{body}</div>
        </div>
    }
}

/// Chat input form with textarea and send button.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());

    let is_sending = move || state.session.with(|s| s.is_query_in_flight);

    let send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || is_sending() {
            return;
        }
        set_input.set(String::new());
        state.send_message(text);
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    view! {
        <div class="input-area">
            <div class="input-row">
                <textarea
                    rows="1"
                    placeholder="Zeptejte se na cokoli z vybrané dokumentace… (Enter odešle)"
                    prop:value=input
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                    disabled=is_sending
                />
                <button
                    class="send-btn"
                    on:click=move |_| send()
                    disabled=move || is_sending() || input.get().trim().is_empty()
                >
                    {move || if is_sending() { "Odesílání…" } else { "Odeslat" }}
                </button>
            </div>
        </div>
    }
}
