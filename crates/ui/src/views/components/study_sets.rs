use std::sync::Arc;
use std::time::Duration;

use coach_core::SetPaginator;
use coach_core::model::StudySet;
use dioxus::prelude::*;
use services::ChatSession;

use crate::context::AppContext;
use crate::vm::{SWAP_MS, swap_out_style};

use super::FlashcardStack;

/// What a "see more" click should do given the paginator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeeMoreAction {
    /// Serve the next page from the sets already in hand.
    LocalPage,
    /// Local sets exhausted: issue one backend request for a fresh batch.
    Fetch,
    /// A request is already in flight; the click is dropped.
    Ignore,
}

fn see_more_action(exhausted: bool, fetching: bool) -> SeeMoreAction {
    if !exhausted {
        SeeMoreAction::LocalPage
    } else if fetching {
        SeeMoreAction::Ignore
    } else {
        SeeMoreAction::Fetch
    }
}

/// Click target for a card body: expand when collapsed, collapse when the
/// click reaches an expanded card's background.
fn toggle_target(expanded: Option<u64>, set_id: u64) -> Option<u64> {
    if expanded == Some(set_id) {
        None
    } else {
        Some(set_id)
    }
}

/// Paged grid of study set cards with a "see more" control. Paging through
/// the sets already in hand never touches the network; once the local pool
/// runs out, one more click asks the coach for a fresh batch.
#[component]
pub fn StudySetCards(
    sets: Vec<StudySet>,
    topic_hint: String,
    interactive: bool,
    session: Signal<ChatSession>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let coach = ctx.coach();
    let paginator = use_signal(|| SetPaginator::new(sets.clone()));
    let expanded = use_signal(|| None::<u64>);
    let fetching = use_signal(|| false);

    let on_see_more = {
        let topic_hint = topic_hint.clone();
        use_callback(move |()| {
            let mut paginator = paginator;
            let mut expanded = expanded;
            let mut fetching = fetching;
            let action = see_more_action(paginator.peek().is_exhausted(), *fetching.peek());
            match action {
                SeeMoreAction::Ignore => {}
                SeeMoreAction::LocalPage => {
                    expanded.set(None);
                    paginator.write().next_page();
                }
                SeeMoreAction::Fetch => {
                    fetching.set(true);
                    let coach = Arc::clone(&coach);
                    let topic = topic_hint.clone();
                    spawn(async move {
                        let history = session.peek().outbound_history();
                        let fresh = coach.fetch_more_sets(&topic, &history).await;
                        expanded.set(None);
                        paginator.write().replace(fresh);
                        fetching.set(false);
                    });
                }
            }
        })
    };

    if paginator.read().is_empty() {
        return rsx! {
            p { class: "study-sets-empty", "No study sets matched this topic yet." }
        };
    }

    let shown = paginator.read().shown().to_vec();
    let exhausted = paginator.read().is_exhausted();
    let is_fetching = fetching();
    let see_more_label = if is_fetching {
        "Searching..."
    } else if exhausted {
        "See more (new search)"
    } else {
        "See more"
    };

    rsx! {
        div { class: "study-sets",
            div { class: "study-set-grid",
                for set in shown {
                    StudySetCard {
                        key: "{set.id}",
                        set: set.clone(),
                        expanded,
                        interactive,
                    }
                }
            }
            button {
                class: "btn btn-secondary see-more",
                r#type: "button",
                disabled: !interactive || is_fetching,
                onclick: move |_| on_see_more.call(()),
                "{see_more_label}"
            }
        }
    }
}

#[component]
fn StudySetCard(set: StudySet, expanded: Signal<Option<u64>>, interactive: bool) -> Element {
    let is_expanded = *expanded.read() == Some(set.id);
    let set_id = set.id;
    let studiers = set.studiers_today;
    let swapping = use_signal(|| false);

    // Fade the card out for the fixed swap tween, then replace its body.
    let begin_swap = use_callback(move |target: Option<u64>| {
        let mut swapping = swapping;
        let mut expanded = expanded;
        if *swapping.peek() {
            return;
        }
        swapping.set(true);
        spawn(async move {
            tokio::time::sleep(Duration::from_millis(SWAP_MS)).await;
            expanded.set(target);
            swapping.set(false);
        });
    });

    let style = if swapping() {
        swap_out_style()
    } else {
        String::new()
    };

    if is_expanded {
        return rsx! {
            div {
                class: "study-set-card study-set-card--expanded",
                style: "{style}",
                // Background click collapses; the flashcard stack and the
                // buttons stop their own clicks from bubbling here.
                onclick: move |_| begin_swap.call(toggle_target(*expanded.peek(), set_id)),
                header { class: "study-set-card-header",
                    h4 { class: "study-set-title", "{set.title}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |evt| {
                            evt.stop_propagation();
                            begin_swap.call(None);
                        },
                        "Collapse"
                    }
                }
                FlashcardStack { cards: set.flashcards.clone() }
            }
        };
    }

    rsx! {
        div {
            class: "study-set-card",
            style: "{style}",
            onclick: move |_| {
                if interactive {
                    begin_swap.call(toggle_target(*expanded.peek(), set_id));
                }
            },
            h4 { class: "study-set-title", "{set.title}" }
            p { class: "study-set-meta", "{set.term_count} terms" }
            p { class: "study-set-meta", "{studiers} studiers today" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                disabled: !interactive,
                onclick: move |evt| {
                    evt.stop_propagation();
                    if interactive {
                        begin_swap.call(Some(set_id));
                    }
                },
                "Preview"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(count: u64) -> Vec<StudySet> {
        (0..count)
            .map(|id| StudySet::new(id, format!("Set {id}"), 5, Vec::new()))
            .collect()
    }

    #[test]
    fn exhaustion_triggers_exactly_one_request() {
        let mut paginator = SetPaginator::new(sets(5));
        let mut fetching = false;
        let mut requests = 0;

        // Hammer the see-more control; only one click may hit the backend.
        for _ in 0..6 {
            match see_more_action(paginator.is_exhausted(), fetching) {
                SeeMoreAction::LocalPage => {
                    paginator.next_page();
                }
                SeeMoreAction::Fetch => {
                    fetching = true;
                    requests += 1;
                }
                SeeMoreAction::Ignore => {}
            }
        }
        assert_eq!(requests, 1);

        // Once the batch lands, local paging resumes.
        paginator.replace(sets(4));
        fetching = false;
        assert_eq!(
            see_more_action(paginator.is_exhausted(), fetching),
            SeeMoreAction::LocalPage
        );
    }

    #[test]
    fn clicks_toggle_between_expand_and_collapse() {
        assert_eq!(toggle_target(None, 7), Some(7));
        assert_eq!(toggle_target(Some(3), 7), Some(7));
        // A click on the expanded card's own background collapses it.
        assert_eq!(toggle_target(Some(7), 7), None);
    }
}
