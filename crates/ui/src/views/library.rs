use dioxus::prelude::*;
use services::{ChatSession, mock_catalog};

use crate::views::components::StudySetCards;

/// Offline browsing of the built-in catalog. Uses the same card grid as the
/// chat view; "see more" past the catalog still asks the coach, with an
/// empty history.
#[component]
pub fn LibraryView() -> Element {
    let session = use_signal(ChatSession::new);
    let catalog = mock_catalog();

    rsx! {
        div { class: "page library-page",
            header { class: "view-header",
                h2 { class: "view-title", "Library" }
                p { class: "view-subtitle", "Built-in study sets you can browse any time." }
            }
            div { class: "view-divider" }
            StudySetCards {
                sets: catalog,
                topic_hint: "my current topic".to_string(),
                interactive: true,
                session,
            }
        }
    }
}
