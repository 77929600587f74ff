use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn WelcomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let question_count = ctx.quiz_loop().catalog().len();

    rsx! {
        div { class: "page welcome-screen",
            div { class: "welcome-content",
                h2 { "Welcome to Fun Fortune!" }
                p { "Ready to discover what makes you uniquely you?" }
                p { class: "welcome-description",
                    "Answer {question_count} quick questions and I'll reveal your personality type with a special message just for you!"
                }
                button {
                    class: "start-button",
                    id: "welcome-start",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Chat {});
                    },
                    "Start Your Journey"
                }
            }
        }
    }
}
