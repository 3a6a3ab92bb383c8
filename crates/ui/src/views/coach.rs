use std::sync::Arc;

use coach_core::model::AttachmentDraft;
use dioxus::prelude::*;
use services::{ChatSession, failure_message};

use crate::context::AppContext;
use crate::views::components::{Composer, Transcript};
use crate::vm::{RichMessage, TimedStep, TranscriptEntry, build_timeline, format_message};

const SUGGESTIONS: &[&str] = &[
    "Help me cram for a test",
    "Make flashcards from my notes",
    "Quiz me on what I'm studying",
];

/// The chat view. Owns the session, the transcript, and the typing
/// animation generation counter; everything below it renders from those.
#[component]
pub fn CoachView() -> Element {
    let ctx = use_context::<AppContext>();
    let coach = ctx.coach();
    let session = use_signal(ChatSession::new);
    let entries = use_signal(Vec::<TranscriptEntry>::new);
    let generation = use_signal(|| 0u64);
    let draft_text = use_signal(String::new);
    let attachment = use_signal(|| None::<AttachmentDraft>);
    let confirm_clear = use_signal(|| false);

    let submit = {
        let coach = coach.clone();
        use_callback(move |message: String| {
            let coach = Arc::clone(&coach);
            let mut session = session;
            let mut entries = entries;
            let mut generation = generation;
            let mut draft_text = draft_text;
            let mut attachment = attachment;
            let mut confirm_clear = confirm_clear;

            let staged = attachment.peek().clone();
            if message.trim().is_empty() && staged.is_none() {
                return;
            }
            let prepared = match session.write().prepare_submit(&message, staged.is_some()) {
                Ok(prepared) => prepared,
                // Busy: a request is already in flight, ignore the click.
                Err(_) => return,
            };
            draft_text.set(String::new());
            attachment.set(None);
            confirm_clear.set(false);
            entries
                .write()
                .push(TranscriptEntry::User(prepared.message.clone()));

            spawn(async move {
                match coach.send(&prepared, staged.as_ref()).await {
                    Ok(reply) => {
                        session.write().complete(reply.clone());
                        let rich = RichMessage::new(format_message(&reply));
                        let timeline = build_timeline(rich.blocks());
                        let index = {
                            let mut entries = entries.write();
                            entries.push(TranscriptEntry::Assistant(rich));
                            entries.len() - 1
                        };
                        let this_generation = *generation.peek() + 1;
                        generation.set(this_generation);
                        run_typing(entries, index, timeline, generation, this_generation).await;
                    }
                    Err(err) => {
                        session.write().fail();
                        entries
                            .write()
                            .push(TranscriptEntry::ErrorBubble(failure_message(&err)));
                    }
                }
            });
        })
    };

    let on_clear = use_callback(move |()| {
        let mut session = session;
        let mut entries = entries;
        let mut generation = generation;
        let mut confirm_clear = confirm_clear;

        if session.peek().is_empty() {
            return;
        }
        if !*confirm_clear.peek() {
            confirm_clear.set(true);
            return;
        }
        // Bump the generation first so an in-flight animation task stops
        // touching the transcript it is about to lose.
        let next_generation = *generation.peek() + 1;
        generation.set(next_generation);
        session.write().reset();
        entries.write().clear();
        confirm_clear.set(false);
    });

    let waiting = session.read().is_waiting();
    let has_history = !session.read().is_empty();
    let confirming = confirm_clear();
    let clear_label = if confirming {
        "Click again to confirm"
    } else {
        "New conversation"
    };
    let clear_class = if confirming {
        "btn btn-danger"
    } else {
        "btn btn-secondary"
    };

    rsx! {
        div { class: "page coach-page",
            header { class: "view-header",
                h2 { class: "view-title", "AI Coach" }
                button {
                    class: "{clear_class}",
                    r#type: "button",
                    disabled: !has_history,
                    onclick: move |_| on_clear.call(()),
                    "{clear_label}"
                }
            }
            div { class: "view-divider" }
            if entries.read().is_empty() {
                div { class: "coach-empty",
                    p { class: "coach-empty-title", "What are we studying today?" }
                    div { class: "suggestion-chips",
                        for suggestion in SUGGESTIONS {
                            button {
                                key: "{suggestion}",
                                class: "chip",
                                r#type: "button",
                                onclick: move |_| submit.call((*suggestion).to_string()),
                                "{suggestion}"
                            }
                        }
                    }
                }
            } else {
                Transcript { entries, session, waiting }
            }
            Composer {
                draft: draft_text,
                attachment,
                waiting,
                on_submit: move |message| submit.call(message),
            }
        }
    }
}

/// Drive one message's typing timeline. A generation bump from a newer
/// message or a cleared transcript ends the loop; the superseded message
/// snaps to fully revealed rather than freezing half-typed.
async fn run_typing(
    mut entries: Signal<Vec<TranscriptEntry>>,
    index: usize,
    timeline: Vec<TimedStep>,
    generation: Signal<u64>,
    this_generation: u64,
) {
    for timed in timeline {
        tokio::time::sleep(timed.delay).await;
        let superseded = *generation.peek() != this_generation;
        let mut entries = entries.write();
        let Some(TranscriptEntry::Assistant(rich)) = entries.get_mut(index) else {
            return;
        };
        if superseded {
            rich.reveal_all();
            return;
        }
        rich.apply(timed.step);
    }
}
