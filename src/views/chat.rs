use crate::api::{ApiClient, DocumentBackend};
use crate::session::chat::ChatSession;
use crate::types::Role;
use dioxus::events::Key;
use dioxus::prelude::*;
use std::rc::Rc;

#[component]
pub fn ChatInterface() -> Element {
    let api = use_context::<ApiClient>();
    let mut chat = use_signal(ChatSession::default);
    let mut input = use_signal(String::new);
    let mut end_marker = use_signal(|| Option::<Rc<MountedData>>::None);

    use_effect(move || {
        // Subscribe to transcript changes, then bring the newest message into view.
        let _ = chat.read().messages().len();
        if let Some(marker) = end_marker() {
            spawn(async move {
                if let Err(err) = marker.scroll_to(ScrollBehavior::Smooth).await {
                    tracing::debug!("scroll to latest message failed: {err:?}");
                }
            });
        }
    });

    let send_message = use_callback(move |text: String| {
        let Some(question) = chat.with_mut(|c| c.begin(&text)) else {
            return;
        };
        input.set(String::new());
        let api = api.clone();
        spawn(async move {
            let outcome = api.query(&question).await;
            chat.with_mut(|c| c.resolve(outcome));
        });
    });

    let session = chat.read();
    let pending = session.is_pending();

    rsx! {
        div { class: "chat",
            h2 { class: "section-title", "Chat" }
            div { id: "chat-list", class: "chat-list",
                if session.messages().is_empty() {
                    p { class: "text-muted chat-empty", "Start a conversation by asking a question about your document" }
                }
                for (i, msg) in session.messages().iter().enumerate() {
                    div { key: "{i}",
                        class: format_args!("message-row {}", match msg.role { Role::User => "user", Role::Assistant => "assistant" }),
                        div { class: format_args!("bubble {}", match msg.role { Role::User => "user", Role::Assistant => "assistant" }),
                            if matches!(msg.role, Role::Assistant) {
                                AssistantBubble { content: msg.content.clone() }
                            } else {
                                p { class: "bubble-text", "{msg.content}" }
                            }
                        }
                    }
                }
                if pending {
                    div { class: "message-row assistant",
                        div { class: "bubble assistant",
                            div { class: "shimmer-line",
                                span { class: "shimmer-text", "Thinking…" }
                            }
                        }
                    }
                }
                div { class: "chat-end", onmounted: move |evt| end_marker.set(Some(evt.data())) }
            }

            div { class: "composer",
                input {
                    r#type: "text",
                    placeholder: "Ask a question about your document...",
                    value: "{input}",
                    disabled: pending,
                    oninput: move |ev| input.set(ev.value()),
                    onkeydown: move |ev: KeyboardEvent| {
                        if ev.key() == Key::Enter {
                            ev.prevent_default();
                            send_message.call(input());
                        }
                    },
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: pending || input().trim().is_empty(),
                    onclick: move |_| send_message.call(input()),
                    "Send"
                }
            }
        }
    }
}

#[component]
fn AssistantBubble(content: String) -> Element {
    let copy_payload = content.clone();
    let on_copy = move |_| {
        let raw = copy_payload.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                match arboard::Clipboard::new() {
                    Ok(mut cb) => {
                        if let Err(err) = cb.set_text(raw) {
                            tracing::warn!("copy to clipboard failed: {err}");
                        }
                    }
                    Err(err) => tracing::warn!("clipboard unavailable: {err}"),
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            {
                let _ = raw;
            }
        });
    };

    rsx! {
        p { class: "bubble-text", "{content}" }
        div { class: "bubble-controls",
            button { class: "action-btn", title: "Copy answer", onclick: on_copy, "Copy" }
        }
    }
}
