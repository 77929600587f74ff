use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{ChatView, WelcomeView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", WelcomeView)] Welcome {},
        #[route("/chat", ChatView)] Chat {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            main { class: "content",
                Outlet::<Route> {}
            }
            footer { class: "app-footer",
                p { "Powered by " strong { "Sparky" } }
            }
        }
    }
}
