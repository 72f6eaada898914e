use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::StudyView;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", StudyView)] Study {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "Study Companion" }
                p { class: "app-header__tagline", "Turn your documents into mind maps, quizzes and answers." }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
