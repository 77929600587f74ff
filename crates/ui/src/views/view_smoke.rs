use super::test_harness::{ViewKind, setup_view_harness};
use crate::views::{ExportNotice, ViewError};

#[tokio::test(flavor = "current_thread")]
async fn welcome_view_offers_start_button() {
    let mut harness = setup_view_harness(ViewKind::Welcome);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Welcome to Fun Fortune!"), "missing heading in {html}");
    assert!(html.contains("Start Your Journey"), "missing start button in {html}");
    assert!(html.contains("Answer 5 quick questions"), "missing count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_view_opens_with_intro_and_first_question() {
    let mut harness = setup_view_harness(ViewKind::Chat);
    harness.rebuild();
    let html = harness.render();

    let first = harness.quiz_loop.catalog().get(0).expect("first question").clone();
    assert!(html.contains("Hey there!"), "missing intro in {html}");
    assert!(html.contains(first.text()), "missing first question in {html}");
    for option in first.options() {
        assert!(html.contains(option.as_str()), "missing option {option} in {html}");
    }
    assert!(html.contains("0 / 5"), "missing progress in {html}");
    assert!(!html.contains("personality-card"), "card rendered too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_card_shows_traits_and_actions() {
    let mut harness = setup_view_harness(ViewKind::Card {
        degraded: false,
        notice: None,
    });
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("The Bold Trailblazer"), "missing title in {html}");
    assert!(html.contains("Natural leader"), "missing trait in {html}");
    assert!(html.contains("Take the Test Again"), "missing restart in {html}");
    assert!(html.contains("Save as Image"), "missing export in {html}");
    assert!(!html.contains("card-degraded"), "unexpected notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_card_surfaces_degraded_and_export_notices() {
    let mut harness = setup_view_harness(ViewKind::Card {
        degraded: true,
        notice: Some(ExportNotice::Failed(ViewError::ExportFailed)),
    });
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("card-degraded"), "missing degraded notice in {html}");
    assert!(html.contains(ViewError::ExportFailed.message()), "missing export error in {html}");
    assert!(html.contains("export-notice--error"), "missing error class in {html}");
}
