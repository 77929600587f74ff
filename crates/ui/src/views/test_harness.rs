use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use fortune_core::model::{PersonalityResult, QuestionCatalog};
use fortune_core::time::fixed_clock;
use services::{
    CardExportService, ClassificationClient, ClassificationTransport, QuizLoopService,
    RetryPolicy, TransportError,
};
use tempfile::TempDir;

use crate::context::{UiApp, build_app_context};
use crate::views::{ChatView, ExportNotice, ResultCard, WelcomeView};
use crate::vm::map_result_card;

struct OfflineTransport;

#[async_trait]
impl ClassificationTransport for OfflineTransport {
    async fn analyze(&self, _answers: &[String]) -> Result<PersonalityResult, TransportError> {
        Err(TransportError::Timeout(std::time::Duration::from_secs(30)))
    }
}

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
    card_exporter: Arc<CardExportService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn card_exporter(&self) -> Arc<CardExportService> {
        Arc::clone(&self.card_exporter)
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Welcome,
    Chat,
    Card {
        degraded: bool,
        notice: Option<ExportNotice>,
    },
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Welcome => rsx! { WelcomeView {} },
        ViewKind::Chat => rsx! { ChatView {} },
        ViewKind::Card { degraded, notice } => {
            let result = PersonalityResult::new(
                "The Bold Trailblazer",
                "This is my message for you: keep leading.",
                vec!["Natural leader".into(), "Risk taker".into()],
                "#f5576c",
            );
            rsx! {
                ResultCard {
                    card: map_result_card(&result, degraded),
                    notice,
                    on_restart: move |()| {},
                    on_export: move |()| {},
                }
            }
        }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz_loop: Arc<QuizLoopService>,
    _export_dir: TempDir,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let export_dir = tempfile::tempdir().expect("temp dir");
    let client = ClassificationClient::new(Arc::new(OfflineTransport), RetryPolicy::default());
    let quiz_loop = Arc::new(QuizLoopService::new(
        fixed_clock(),
        Arc::new(QuestionCatalog::builtin()),
        Arc::new(client),
    ));
    let card_exporter = Arc::new(CardExportService::new(export_dir.path()));

    let app = Arc::new(TestApp {
        quiz_loop: Arc::clone(&quiz_loop),
        card_exporter,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        quiz_loop,
        _export_dir: export_dir,
    }
}
