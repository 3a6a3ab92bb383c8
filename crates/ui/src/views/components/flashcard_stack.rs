use std::time::Duration;

use coach_core::{
    CardTransform, FlashcardDeck, GestureOutcome, PointerTracker, SwipeDirection,
    model::Flashcard,
};
use dioxus::prelude::*;

use crate::vm::{EXIT_MS, SPRING_MS, exit_card_style, live_card_style, spring_back_style};

/// Interactive stack of flashcards. One pointer gesture model drives both
/// mouse and touch: a short press flips the active card, a horizontal drag
/// past the commit threshold sends it to the back of the deck. Gestures
/// start on the active card only; the container tracks movement and
/// release so a fast drag cannot escape mid-gesture. Dots and the hint
/// row never reach the tracker.
#[component]
pub fn FlashcardStack(cards: Vec<Flashcard>) -> Element {
    let mut deck = use_signal(|| FlashcardDeck::new(cards.len()));
    let mut tracker = use_signal(PointerTracker::new);
    let mut live = use_signal(|| None::<CardTransform>);
    let mut springing = use_signal(|| false);
    let exiting = use_signal(|| None::<SwipeDirection>);

    let begin = use_callback(move |(x, y): (f64, f64)| {
        let mut tracker = tracker;
        if exiting.peek().is_none() {
            tracker.write().press(x, y);
        }
    });

    let update = use_callback(move |(x, y): (f64, f64)| {
        let mut tracker = tracker;
        let mut live = live;
        let mut springing = springing;
        if let Some(transform) = tracker.write().move_to(x, y) {
            springing.set(false);
            live.set(Some(transform));
        }
    });

    let finish = use_callback(move |()| {
        let mut tracker = tracker;
        let mut deck = deck;
        let mut live = live;
        let mut springing = springing;
        let mut exiting = exiting;
        match tracker.write().release() {
            Some(GestureOutcome::Tap) => {
                deck.write().toggle_flip();
            }
            Some(GestureOutcome::SpringBack) => {
                if live.peek().is_some() {
                    live.set(None);
                    springing.set(true);
                    spawn(async move {
                        tokio::time::sleep(Duration::from_millis(SPRING_MS)).await;
                        springing.set(false);
                    });
                }
            }
            Some(GestureOutcome::Commit(direction)) => {
                live.set(None);
                exiting.set(Some(direction));
                spawn(async move {
                    tokio::time::sleep(Duration::from_millis(EXIT_MS)).await;
                    deck.write().swipe(direction);
                    exiting.set(None);
                });
            }
            None => {}
        }
    });

    let abandon = use_callback(move |()| {
        let mut tracker = tracker;
        let mut live = live;
        tracker.write().cancel();
        live.set(None);
    });

    if cards.is_empty() {
        return rsx! {
            p { class: "flashcard-empty", "This set has no cards yet." }
        };
    }

    let order = deck.read().order().to_vec();
    let active = deck.read().active();
    let flipped = deck.read().is_flipped();
    let card_total = cards.len();

    rsx! {
        div {
            class: "flashcard-stack",
            // Clicks inside the stack must not reach an enclosing card's
            // collapse handler.
            onclick: move |evt| evt.stop_propagation(),
            onmousemove: move |evt| {
                if tracker.peek().is_active() {
                    let point = evt.data.client_coordinates();
                    update.call((point.x, point.y));
                }
            },
            onmouseup: move |_| finish.call(()),
            onmouseleave: move |_| abandon.call(()),
            ontouchmove: move |evt| {
                if let Some(touch) = evt.data.touches().first() {
                    let point = touch.client_coordinates();
                    update.call((point.x, point.y));
                }
            },
            ontouchend: move |_| finish.call(()),
            div { class: "flashcard-deck",
                for (position, stable) in order.iter().copied().enumerate() {
                    {
                        let card = &cards[stable];
                        let is_active = position == 0;
                        let mut style = format!("z-index: {};", card_total - position);
                        if is_active {
                            if let Some(direction) = *exiting.read() {
                                style.push_str(&exit_card_style(direction));
                            } else if let Some(transform) = *live.read() {
                                style.push_str(&live_card_style(&transform));
                            } else if springing() {
                                style.push_str(&spring_back_style());
                            }
                        }
                        let mut class = String::from("flashcard");
                        if is_active {
                            class.push_str(" flashcard--active");
                            if flipped {
                                class.push_str(" flashcard--flipped");
                            }
                        } else {
                            class.push_str(" flashcard--behind");
                        }
                        rsx! {
                            div {
                                key: "{stable}",
                                class: "{class}",
                                style: "{style}",
                                onmousedown: move |evt| {
                                    if is_active {
                                        let point = evt.data.client_coordinates();
                                        begin.call((point.x, point.y));
                                    }
                                },
                                ontouchstart: move |evt| {
                                    if is_active && let Some(touch) = evt.data.touches().first() {
                                        let point = touch.client_coordinates();
                                        begin.call((point.x, point.y));
                                    }
                                },
                                div { class: "flashcard-face flashcard-front", "{card.term}" }
                                div { class: "flashcard-face flashcard-back", "{card.definition}" }
                            }
                        }
                    }
                }
            }
            div { class: "flashcard-dots",
                for slot in 0..card_total {
                    {
                        let label = format!("Card {}", slot + 1);
                        let dot_class = if active == Some(slot) { "dot dot--active" } else { "dot" };
                        rsx! {
                            button {
                                key: "{slot}",
                                class: "{dot_class}",
                                r#type: "button",
                                aria_label: "{label}",
                                onclick: move |evt| {
                                    evt.stop_propagation();
                                    let mut deck = deck;
                                    if exiting.peek().is_none() {
                                        deck.write().jump_to(slot);
                                    }
                                },
                            }
                        }
                    }
                }
            }
            p { class: "flashcard-hint", "Tap to flip, swipe to move on" }
        }
    }
}
