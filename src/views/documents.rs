use crate::api::{ApiClient, DocumentBackend};
use crate::session::documents::DocumentShelf;
use crate::types::Document;
use dioxus::prelude::*;

#[component]
pub fn DocumentList(refresh_generation: ReadOnlySignal<u64>) -> Element {
    let api = use_context::<ApiClient>();
    let mut shelf = use_signal(DocumentShelf::default);

    {
        let api = api.clone();
        // Runs on mount and again whenever the generation changes.
        use_effect(move || {
            let generation = refresh_generation();
            let api = api.clone();
            spawn(async move {
                tracing::debug!(generation, "fetching documents");
                let ticket = shelf.with_mut(|s| s.begin_fetch());
                let result = api.list_documents().await;
                shelf.with_mut(|s| s.apply_fetch(ticket, result));
            });
        });
    }

    let confirm_delete = move |_: MouseEvent| {
        let Some(id) = shelf.with_mut(|s| s.confirm_delete()) else {
            return;
        };
        let api = api.clone();
        spawn(async move {
            let result = api.delete_document(&id).await;
            shelf.with_mut(|s| s.apply_delete(&id, result));
        });
    };

    let current = shelf.read();
    if current.is_loading() {
        return rsx! {
            div { class: "documents",
                div { class: "spinner", aria_label: "Loading documents" }
            }
        };
    }

    let pending = current.pending_delete().cloned();
    let alert = current.alert().map(str::to_string);

    rsx! {
        div { class: "documents",
            h2 { class: "section-title", "Uploaded Documents" }
            if let Some(error) = current.error() {
                div { class: "notice notice-error banner", "{error}" }
            }
            if current.documents().is_empty() {
                p { class: "text-muted doc-empty", "No documents uploaded yet" }
            } else {
                div { class: "doc-list",
                    for doc in current.documents().iter().cloned() {
                        DocumentRow { key: "{doc.id}", doc, shelf }
                    }
                }
            }
        }
        if let Some(doc) = pending {
            div { class: "doc-overlay", role: "dialog", aria_modal: "true",
                onclick: move |_| shelf.with_mut(|s| s.cancel_delete()),
                div {
                    class: "doc-overlay-panel",
                    onclick: move |evt| evt.stop_propagation(),
                    p { "Are you sure you want to delete " strong { "{doc.filename}" } "?" }
                    div { class: "doc-overlay-actions",
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            onclick: move |_| shelf.with_mut(|s| s.cancel_delete()),
                            "Cancel"
                        }
                        button {
                            class: "btn btn-danger",
                            r#type: "button",
                            onclick: confirm_delete,
                            "Delete"
                        }
                    }
                }
            }
        }
        if let Some(message) = alert {
            div { class: "doc-overlay", role: "alertdialog", aria_modal: "true",
                div { class: "doc-overlay-panel",
                    p { class: "notice-error", "{message}" }
                    div { class: "doc-overlay-actions",
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| shelf.with_mut(|s| s.dismiss_alert()),
                            "OK"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DocumentRow(doc: Document, shelf: Signal<DocumentShelf>) -> Element {
    let uploaded = doc.uploaded_label();
    let id = doc.id.clone();
    rsx! {
        div { class: "doc-row",
            div { class: "doc-row-main",
                span { class: "doc-row-title", "{doc.filename}" }
                span { class: "doc-row-date", "Uploaded {uploaded}" }
            }
            if let Some(url) = doc.file_url.as_deref() {
                a { class: "btn btn-ghost", href: "{url}", target: "_blank", "Open" }
            }
            button {
                class: "btn btn-ghost doc-delete",
                r#type: "button",
                title: "Delete document",
                aria_label: "Delete {doc.filename}",
                onclick: move |_| shelf.with_mut(|s| s.request_delete(id.clone())),
                dangerous_inner_html: "&#128465;"
            }
        }
    }
}
