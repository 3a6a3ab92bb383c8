use dioxus::prelude::*;
use services::ChatSession;

use crate::vm::{BlockVisibility, MessageBlock, TranscriptEntry};

use super::StudySetCards;

/// Scrollback for the conversation. User turns and error turns are plain
/// bubbles; assistant turns render block by block as the typing animation
/// reveals them.
#[component]
pub fn Transcript(
    entries: Signal<Vec<TranscriptEntry>>,
    session: Signal<ChatSession>,
    waiting: bool,
) -> Element {
    let entry_count = entries.read().len();
    rsx! {
        div { class: "transcript",
            for index in 0..entry_count {
                {render_entry(index, entries, session)}
            }
            if waiting {
                div { class: "bubble bubble--assistant typing-indicator",
                    span {}
                    span {}
                    span {}
                }
            }
        }
    }
}

fn render_entry(
    index: usize,
    entries: Signal<Vec<TranscriptEntry>>,
    session: Signal<ChatSession>,
) -> Element {
    let entries_read = entries.read();
    match entries_read.get(index) {
        Some(TranscriptEntry::User(text)) => rsx! {
            div { key: "{index}", class: "bubble bubble--user", "{text}" }
        },
        Some(TranscriptEntry::ErrorBubble(text)) => rsx! {
            div { key: "{index}", class: "bubble bubble--error", "{text}" }
        },
        Some(TranscriptEntry::Assistant(_)) => rsx! {
            AssistantMessage { key: "{index}", entry_index: index, entries, session }
        },
        None => rsx! {},
    }
}

#[component]
fn AssistantMessage(
    entry_index: usize,
    entries: Signal<Vec<TranscriptEntry>>,
    session: Signal<ChatSession>,
) -> Element {
    let entries_read = entries.read();
    let Some(TranscriptEntry::Assistant(rich)) = entries_read.get(entry_index) else {
        return rsx! {};
    };

    let sets = rich.formatted.sets.clone().unwrap_or_default();
    let interactive = rich.interactive;
    let block_count = rich.blocks().len();

    rsx! {
        div { class: "bubble bubble--assistant",
            for block_index in 0..block_count {
                {
                    let block = &rich.blocks()[block_index];
                    match rich.visibility[block_index] {
                        BlockVisibility::Hidden => rsx! {},
                        BlockVisibility::Partial(_) => {
                            let text = rich.partial_text(block_index).unwrap_or_default();
                            rsx! {
                                p { key: "{block_index}", class: "message-block message-block--typing", "{text}" }
                            }
                        }
                        BlockVisibility::Full => match block {
                            MessageBlock::StudySets { topic_hint } => rsx! {
                                StudySetCards {
                                    key: "{block_index}",
                                    sets: sets.clone(),
                                    topic_hint: topic_hint.clone(),
                                    interactive,
                                    session,
                                }
                            },
                            MessageBlock::DraftCard { topic } => rsx! {
                                DraftCardView { key: "{block_index}", topic: topic.clone() }
                            },
                            _ => {
                                let html = block.html().unwrap_or_default().to_string();
                                rsx! {
                                    div {
                                        key: "{block_index}",
                                        class: "message-block",
                                        dangerous_inner_html: "{html}",
                                    }
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn DraftCardView(topic: String) -> Element {
    rsx! {
        div { class: "draft-card",
            span { class: "draft-card-badge", "Draft" }
            h4 { class: "draft-card-title", "Flashcard set: {topic}" }
            p { class: "draft-card-hint", "Ask the coach to fill in the cards when you're ready." }
        }
    }
}
