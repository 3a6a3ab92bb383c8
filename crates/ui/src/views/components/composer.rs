use coach_core::model::AttachmentDraft;
use dioxus::prelude::*;

/// Message input row: text field, file picker, staged-attachment chip and
/// the send button. Submitting hands the raw text to the parent; the parent
/// owns the session and decides what actually goes out.
#[component]
pub fn Composer(
    draft: Signal<String>,
    attachment: Signal<Option<AttachmentDraft>>,
    waiting: bool,
    on_submit: EventHandler<String>,
) -> Element {
    let staged = attachment.read().clone();
    let text = draft.read().clone();
    let can_send = !waiting && (!text.trim().is_empty() || staged.is_some());

    let send = use_callback(move |()| {
        on_submit.call(draft.peek().clone());
    });

    rsx! {
        div { class: "composer",
            if let Some(file) = staged {
                div { class: "attachment-chip",
                    span { class: "attachment-chip-name", "{file.name}" }
                    span { class: "attachment-chip-size", "{format_size(file.size)}" }
                    button {
                        class: "attachment-chip-remove",
                        r#type: "button",
                        aria_label: "Remove attachment",
                        onclick: move |_| {
                            let mut attachment = attachment;
                            attachment.set(None);
                        },
                        "✕"
                    }
                }
            }
            div { class: "composer-row",
                label { class: "attach-button", aria_label: "Attach a file",
                    input {
                        class: "attach-input",
                        r#type: "file",
                        accept: ".png,.jpg,.jpeg,.gif,.webp,.bmp,.pdf,.txt,.md,.docx",
                        onchange: move |evt| {
                            if let Some(file) = evt.data.files().into_iter().next() {
                                let mut attachment = attachment;
                                spawn(async move {
                                    if let Ok(bytes) = file.read_bytes().await {
                                        attachment
                                            .set(Some(AttachmentDraft::new(file.name(), bytes.to_vec())));
                                    }
                                });
                            }
                        },
                    }
                    "+"
                }
                input {
                    class: "composer-input",
                    r#type: "text",
                    placeholder: "Ask your coach anything",
                    value: "{text}",
                    oninput: move |evt| {
                        let mut draft = draft;
                        draft.set(evt.value());
                    },
                    onkeydown: move |evt| {
                        if matches!(evt.data.key(), Key::Enter) {
                            send.call(());
                        }
                    },
                }
                button {
                    class: "btn btn-primary send-button",
                    r#type: "button",
                    disabled: !can_send,
                    onclick: move |_| send.call(()),
                    "Send"
                }
            }
        }
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{bytes} B")
    }
}
