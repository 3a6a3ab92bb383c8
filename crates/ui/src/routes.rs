use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{CoachView, LibraryView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", CoachView)] Coach {},
        #[route("/library", LibraryView)] Library {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let backend_label = ctx.backend_label().to_string();
    rsx! {
        nav { class: "sidebar",
            h1 { "Study Coach" }
            ul {
                li { Link { to: Route::Coach {}, "Coach" } }
                li { Link { to: Route::Library {}, "Library" } }
            }
            p { class: "sidebar-footer", "Backend: {backend_label}" }
        }
    }
}
