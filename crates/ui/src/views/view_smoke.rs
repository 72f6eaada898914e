use std::path::PathBuf;

use services::{Endpoint, FileSource, ScriptedBackend, SessionRequest, UploadFile};
use study_core::model::{
    ActiveView, ConceptNode, PLACEHOLDER_PROMPT, QuestionRecord, STATUS_PROCESSED,
};

use super::test_harness::setup_view_harness;
use crate::vm::QuizScreen;

fn submit_request() -> SessionRequest {
    SessionRequest::SubmitDocuments {
        files: vec![FileSource::from(UploadFile::new("notes.txt", b"cells".to_vec()))],
        media_url: None,
    }
}

fn quiz() -> Vec<QuestionRecord> {
    let options = || vec!["A".to_string(), "B".to_string(), "C".to_string()];
    vec![
        QuestionRecord::new("Which organelle makes energy?", options(), "A"),
        QuestionRecord::new("Second?", options(), "B"),
        QuestionRecord::new("Third?", options(), "C"),
    ]
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_renders_placeholder_and_presets() {
    let harness = setup_view_harness(
        ScriptedBackend::new(),
        vec![PathBuf::from("lectures/week1.pdf")],
    );

    let html = harness.render();
    assert!(html.contains(PLACEHOLDER_PROMPT), "missing placeholder in {html}");
    assert!(html.contains("lectures/week1.pdf"), "missing preset path in {html}");
    assert!(html.contains("Generate Mind Map"), "missing action bar in {html}");
    assert!(html.contains("Process"), "missing process button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_submit_then_quiz() {
    let mut harness = setup_view_harness(ScriptedBackend::new().with_quiz(quiz()), Vec::new());

    harness.dispatch(submit_request()).await;
    let session = harness.session();
    assert!(session.is_ready());
    assert!(!session.is_busy());
    assert!(harness.render().contains(STATUS_PROCESSED));

    harness.dispatch(SessionRequest::GenerateQuiz).await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing position in {html}");
    assert!(html.contains("Which organelle makes energy?"), "missing prompt in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
    assert!(html.contains("Generated 2023-11-14 22:13 UTC"), "missing caption in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_new_quiz_restarts_from_first_question() {
    let mut harness = setup_view_harness(ScriptedBackend::new().with_quiz(quiz()), Vec::new());
    harness.dispatch(submit_request()).await;
    harness.dispatch(SessionRequest::GenerateQuiz).await;

    harness.update_quiz(|vm| {
        vm.select("A");
        assert!(vm.submit().is_some());
        vm.select("C");
    });
    let html = harness.render();
    assert!(html.contains("Question 2 of 3"), "quiz did not advance in {html}");

    harness.dispatch(SessionRequest::GenerateQuiz).await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "quiz did not restart in {html}");
    assert!(html.contains("Which organelle makes energy?"), "missing prompt in {html}");
    match harness.quiz().screen() {
        QuizScreen::InProgress { options, .. } => {
            assert_eq!(options.len(), 3);
            assert!(options.iter().all(|option| !option.selected));
        }
        other => panic!("expected a running quiz, got {other:?}"),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_empty_quiz_shows_notice() {
    let mut harness = setup_view_harness(ScriptedBackend::new(), Vec::new());

    harness.dispatch(submit_request()).await;
    harness.dispatch(SessionRequest::GenerateQuiz).await;

    let html = harness.render();
    assert!(html.contains("No quiz available."), "missing notice in {html}");
    assert!(!html.contains("Question 1"), "unexpected question in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_renders_mind_map_blocks() {
    let root = ConceptNode::new(
        "Photosynthesis",
        vec![ConceptNode::leaf("Light reactions"), ConceptNode::leaf("Calvin cycle")],
    );
    let mut harness = setup_view_harness(ScriptedBackend::new().with_mind_map(root), Vec::new());

    harness.dispatch(submit_request()).await;
    harness.dispatch(SessionRequest::GenerateMindMap).await;

    let html = harness.render();
    assert_eq!(harness.session().active_view(), ActiveView::MindMap);
    assert!(html.contains("Photosynthesis"), "missing root in {html}");
    let light = html.find("Light reactions").expect("first child rendered");
    let calvin = html.find("Calvin cycle").expect("second child rendered");
    assert!(light < calvin, "children out of order in {html}");
    assert_eq!(html.matches("mind-map-node__children").count(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_failure_shows_detail() {
    let mut harness = setup_view_harness(ScriptedBackend::new(), Vec::new());
    harness.dispatch(submit_request()).await;

    harness
        .backend
        .fail(Endpoint::MindMap, Some("no documents processed"));
    harness.dispatch(SessionRequest::GenerateMindMap).await;

    let html = harness.render();
    assert!(
        html.contains("Error: no documents processed"),
        "missing error status in {html}"
    );
    assert!(html.contains(PLACEHOLDER_PROMPT), "view changed in {html}");
    assert!(!harness.session().is_busy());
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_answers_render_markdown() {
    let mut harness = setup_view_harness(
        ScriptedBackend::new().with_answer("The answer is **42**."),
        Vec::new(),
    );
    harness.dispatch(submit_request()).await;
    harness.update_session(|session| {
        session
            .activate_question_answer_view()
            .expect("documents processed");
    });

    let html = harness.render();
    assert!(
        html.contains("Ask a question about your documents..."),
        "missing question input in {html}"
    );

    harness
        .dispatch(SessionRequest::AskQuestion("What is the answer?".into()))
        .await;
    let html = harness.render();
    assert!(html.contains("<strong>42</strong>"), "missing answer in {html}");
    assert!(html.contains("Q: What is the answer?"), "missing question in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_ignores_generation_before_submission() {
    let mut harness = setup_view_harness(ScriptedBackend::new(), Vec::new());

    harness.dispatch(SessionRequest::GenerateQuiz).await;

    assert!(harness.backend.calls().is_empty());
    assert!(!harness.session().is_busy());
    assert!(harness.render().contains(PLACEHOLDER_PROMPT));
}
