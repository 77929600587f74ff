use dioxus::core::Task;
use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::warn;

use services::Advance;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ExportNotice, ResultCard, ViewError};
use crate::vm::{ChatBubbleVm, QuizVm};

const SCROLL_TO_BOTTOM: &str = r#"
    const log = document.getElementById("chat-log");
    if (log) { log.scrollTop = log.scrollHeight; }
"#;

#[component]
pub fn ChatView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();
    let exporter = ctx.card_exporter();

    let vm = use_signal({
        let quiz_loop = quiz_loop.clone();
        move || QuizVm::start(&quiz_loop)
    });
    let pending = use_signal(|| None::<Task>);
    let export_notice = use_signal(|| None::<ExportNotice>);
    let flow_error = use_signal(|| None::<ViewError>);

    let bubbles = vm.read().bubbles();
    let options = vm.read().options();
    let emoji = vm.read().current_emoji();
    let progress = vm.read().progress_label();
    let card = vm.read().result_card();

    use_effect(move || {
        // Subscribes to the chat so new turns scroll into view.
        let _turns = vm.read().session().chat().len();
        let _ = eval(SCROLL_TO_BOTTOM);
    });

    let on_answer = {
        let quiz_loop = quiz_loop.clone();
        let mut vm = vm;
        let mut pending = pending;
        let mut flow_error = flow_error;
        use_callback(move |answer: String| {
            let step = match vm.write().record_answer(&answer) {
                Ok(step) => step,
                Err(err) => {
                    warn!(error = %err, "answer ignored");
                    return;
                }
            };
            let quiz_loop = quiz_loop.clone();
            let task = spawn(async move {
                quiz_loop.pace(step).await;
                let advance = vm.write().advance();
                match advance {
                    Ok(Advance::Question(_)) => {}
                    Ok(Advance::Classify(ticket)) => {
                        let classification = quiz_loop.classify(&ticket).await;
                        vm.write().finish(&quiz_loop, &ticket, classification);
                    }
                    Err(err) => {
                        warn!(error = %err, "could not advance quiz");
                        flow_error.set(Some(ViewError::Unknown));
                    }
                }
                pending.set(None);
            });
            pending.set(Some(task));
        })
    };

    let on_restart = {
        let mut vm = vm;
        let mut pending = pending;
        let mut export_notice = export_notice;
        let mut flow_error = flow_error;
        use_callback(move |()| {
            if let Some(task) = pending.write().take() {
                task.cancel();
            }
            vm.write().restart();
            export_notice.set(None);
            flow_error.set(None);
            let _ = navigator.replace(Route::Welcome {});
        })
    };

    let on_export = {
        let exporter = exporter.clone();
        let mut export_notice = export_notice;
        use_callback(move |()| {
            let Some(result) = vm.read().session().result().cloned() else {
                return;
            };
            let exporter = exporter.clone();
            spawn(async move {
                let notice = match exporter.export(&result).await {
                    Ok(path) => ExportNotice::Saved(path.display().to_string()),
                    Err(err) => {
                        warn!(error = %err, "card export failed");
                        ExportNotice::Failed(ViewError::ExportFailed)
                    }
                };
                export_notice.set(Some(notice));
            });
        })
    };

    rsx! {
        div { class: "page chat-container",
            div { class: "chat-header",
                h2 { "Fun Fortune" }
                span { class: "chat-progress", "{progress}" }
            }
            div { class: "chat-messages", id: "chat-log",
                for bubble in bubbles {
                    ChatBubble { key: "{bubble.key}", bubble: bubble.clone() }
                }
            }
            if let Some(err) = flow_error() {
                p { class: "chat-error", role: "alert", "{err.message()}" }
            }
            if !options.is_empty() {
                div { class: "options-container",
                    if let Some(emoji) = emoji {
                        span { class: "question-emoji", "{emoji}" }
                    }
                    for (index, option) in options.into_iter().enumerate() {
                        button {
                            key: "{index}",
                            class: "option-button",
                            r#type: "button",
                            onclick: move |_| on_answer.call(option.clone()),
                            "{option}"
                        }
                    }
                }
            }
            if let Some(card) = card {
                ResultCard {
                    card,
                    notice: export_notice(),
                    on_restart,
                    on_export,
                }
            }
        }
    }
}

#[component]
fn ChatBubble(bubble: ChatBubbleVm) -> Element {
    let side = if bubble.from_user { "user-message" } else { "bot-message" };
    rsx! {
        div { class: "message {side}",
            div { class: "message-content",
                if bubble.typing {
                    div { class: "typing-indicator",
                        span {}
                        span {}
                        span {}
                    }
                } else {
                    "{bubble.text}"
                }
            }
        }
    }
}
