use dioxus::prelude::*;

use crate::views::ExportNotice;
use crate::vm::ResultCardVm;

#[component]
pub fn ResultCard(
    card: ResultCardVm,
    notice: Option<ExportNotice>,
    on_restart: EventHandler<()>,
    on_export: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "personality-card", style: "border-color: {card.color}",
            div { class: "card-header", style: "background: {card.color}",
                h2 { "Your Personality Type" }
                h1 { "{card.title}" }
            }
            div { class: "card-body",
                if card.degraded {
                    p { class: "card-degraded",
                        "Our analysis service was unavailable, so this reading was made offline."
                    }
                }
                div { class: "message-section",
                    h3 { "Message for you:" }
                    p { class: "message", "{card.message}" }
                }
                div { class: "traits-section",
                    h3 { "Your Key Traits:" }
                    ul { class: "traits-list",
                        for (index, item) in card.traits.iter().enumerate() {
                            li { key: "{index}", "{item}" }
                        }
                    }
                }
                div { class: "card-actions",
                    button {
                        class: "export-button",
                        id: "card-export",
                        r#type: "button",
                        title: "{card.file_name}",
                        onclick: move |_| on_export.call(()),
                        "Save as Image"
                    }
                    button {
                        class: "restart-button",
                        id: "card-restart",
                        r#type: "button",
                        onclick: move |_| on_restart.call(()),
                        "Take the Test Again"
                    }
                }
                if let Some(notice) = notice {
                    p {
                        class: if notice.is_error() { "export-notice export-notice--error" } else { "export-notice" },
                        role: "status",
                        "{notice.text()}"
                    }
                }
            }
        }
    }
}
