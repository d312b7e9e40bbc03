use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::session::upload::{NoticeKind, PickedFile, UploadSession, UploadUpdate, run_upload};
use crate::store::AppEvent;
use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;
use std::path::Path;
use std::sync::Arc;

const FILE_INPUT_ID: &str = "pdf-input";

#[component]
pub fn FileUpload(on_event: EventHandler<AppEvent>) -> Element {
    let api = use_context::<ApiClient>();
    let config = use_context::<AppConfig>();
    let mut session = use_signal(UploadSession::default);
    let mut drag_active = use_signal(|| false);

    let pick_first = move |engine: Arc<dyn FileEngine>| async move {
        let mut session = session;
        let Some(path) = engine.files().into_iter().next() else {
            return;
        };
        let mut file = PickedFile::new(display_file_name(&path), Vec::new());
        // Only read bytes for files that can be accepted. A busy session
        // refuses the pick with a notice before looking at the bytes.
        if file.is_pdf() && !session.peek().is_busy() {
            match engine.read_file(&path).await {
                Some(bytes) => file.bytes = bytes,
                None => {
                    tracing::error!(file = %path, "could not read picked file");
                    return;
                }
            }
        }
        session.with_mut(|s| s.select_file(file));
    };

    let submit = move |_: MouseEvent| {
        let Some(file) = session.with_mut(|s| s.begin_upload()) else {
            return;
        };
        let api = api.clone();
        let every = config.poll_interval;
        // Tasks are scoped to this component, so unmounting also stops polling.
        spawn(async move {
            let mut session = session;
            run_upload(&api, &file, every, |update| {
                session.with_mut(|s| s.apply(&update));
                match update {
                    UploadUpdate::Accepted(id) => on_event.call(AppEvent::UploadAccepted(id)),
                    UploadUpdate::Completed(id) => on_event.call(AppEvent::IngestionCompleted(id)),
                    UploadUpdate::Failed(_) | UploadUpdate::Progress(_) => {}
                }
            })
            .await;
        });
    };

    let (file_name, busy, percent, notice) = session.with(|s| {
        (
            s.file().map(|f| f.name.clone()),
            s.is_busy(),
            s.progress_percent(),
            s.notice().cloned(),
        )
    });
    let has_file = file_name.is_some();

    rsx! {
        div { class: "upload",
            h2 { class: "section-title", "Upload Document" }
            label {
                for: FILE_INPUT_ID,
                class: format_args!(
                    "dropzone {} {}",
                    if drag_active() { "drag-active" } else { "" },
                    if busy { "disabled" } else { "" },
                ),
                ondragenter: move |evt: DragEvent| {
                    evt.prevent_default();
                    drag_active.set(true);
                },
                ondragover: move |evt: DragEvent| {
                    evt.prevent_default();
                    drag_active.set(true);
                },
                ondragleave: move |_| drag_active.set(false),
                ondrop: move |evt: DragEvent| {
                    evt.prevent_default();
                    drag_active.set(false);
                    if let Some(engine) = evt.files() {
                        spawn(pick_first(engine));
                    }
                },
                input {
                    id: FILE_INPUT_ID,
                    class: "hidden",
                    r#type: "file",
                    accept: ".pdf,application/pdf",
                    multiple: false,
                    disabled: busy,
                    onchange: move |evt: FormEvent| {
                        if let Some(engine) = evt.files() {
                            spawn(pick_first(engine));
                        }
                    },
                }
                if let Some(name) = file_name {
                    div { class: "dropzone-file",
                        span { class: "check", "✓" }
                        span { class: "file-name", "{name}" }
                    }
                } else {
                    p { class: "text-muted",
                        "Drag and drop your PDF here, or "
                        span { class: "link", "browse" }
                    }
                }
            }
            button {
                class: "btn btn-primary btn-block",
                r#type: "button",
                disabled: busy || !has_file,
                onclick: submit,
                if busy { "Processing..." } else { "Upload Document" }
            }
            if let Some(percent) = percent {
                div { class: "progress-track",
                    div { class: "progress-fill", style: "width: {percent}%" }
                }
            }
            if let Some(notice) = notice {
                p {
                    class: format_args!(
                        "notice {}",
                        match notice.kind {
                            NoticeKind::Info => "notice-info",
                            NoticeKind::Success => "notice-success",
                            NoticeKind::Error => "notice-error",
                        }
                    ),
                    "{notice.text}"
                }
            }
        }
    }
}

fn display_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}
