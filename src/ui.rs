use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::store::{AppEvent, AppState};
use crate::views::{ChatInterface, DocumentList, FileUpload};
use dioxus::prelude::*;

const DOCQA_CSS: Asset = asset!("/assets/docqa.css");

#[component]
pub fn App() -> Element {
    let config = use_context_provider(AppConfig::load);
    use_context_provider(|| ApiClient::new(config.api_base.clone()));
    let mut state = use_signal(AppState::default);

    let dispatch = move |event: AppEvent| state.with_mut(|s| s.apply(&event));

    rsx! {
        document::Link { rel: "stylesheet", href: DOCQA_CSS }
        div { class: "app",
            AppHeader {}
            div { class: "panels",
                div { class: "panel-column",
                    div { class: "panel",
                        FileUpload { on_event: dispatch }
                    }
                    div { class: "panel",
                        DocumentList { refresh_generation: state().refresh_generation }
                    }
                }
                ChatPanel { unlocked: state().chat_unlocked }
            }
        }
    }
}

#[component]
fn AppHeader() -> Element {
    rsx! {
        div { class: "header",
            h1 { class: "header-title", "Document Q&A" }
            p { class: "text-muted", "Upload your documents and get instant answers to your questions" }
        }
    }
}

#[component]
fn ChatPanel(unlocked: bool) -> Element {
    let class_suffix = if unlocked { "unlocked" } else { "locked" };
    rsx! {
        div { class: format_args!("panel-column chat-column {}", class_suffix),
            div { class: "panel",
                ChatInterface {}
            }
        }
    }
}
