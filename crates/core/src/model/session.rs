use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{ConceptNode, QuestionRecord};

pub const PLACEHOLDER_PROMPT: &str =
    "Upload your documents or provide a YouTube link to get started.";

pub const STATUS_PROCESSING: &str = "Processing documents...";
pub const STATUS_PROCESSED: &str =
    "Documents processed successfully! You can now generate a mind map, quiz, or ask questions.";
pub const STATUS_GENERATING_MIND_MAP: &str = "Generating mind map...";
pub const STATUS_MIND_MAP_READY: &str = "Mind map generated successfully!";
pub const STATUS_GENERATING_QUIZ: &str = "Generating quiz...";
pub const STATUS_QUIZ_READY: &str = "Quiz generated successfully!";
pub const STATUS_ASKING: &str = "Asking question...";
pub const STATUS_ANSWERED: &str = "Answer received.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("another operation is already in flight")]
    Busy,

    #[error("documents have not been processed yet")]
    NotReady,

    #[error("question is empty")]
    EmptyQuestion,
}

//
// ─── VIEW + ARTIFACTS ──────────────────────────────────────────────────────────
//

/// The single active panel of the study screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActiveView {
    #[default]
    None,
    MindMap,
    Quiz,
    QuestionAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MindMapArtifact {
    root: Option<ConceptNode>,
    generated_at: DateTime<Utc>,
}

impl MindMapArtifact {
    #[must_use]
    pub fn root(&self) -> Option<&ConceptNode> {
        self.root.as_ref()
    }

    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizArtifact {
    questions: Vec<QuestionRecord>,
    generated_at: DateTime<Utc>,
    revision: u64,
}

impl QuizArtifact {
    #[must_use]
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Increases with every generated quiz; a new revision means a fresh quiz session.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QaReply {
    Answer(String),
    Failed(String),
}

/// The most recent question and what came back for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaExchange {
    pub question: String,
    pub reply: QaReply,
}

//
// ─── OPERATIONS ────────────────────────────────────────────────────────────────
//

/// A user intent that needs the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    SubmitDocuments,
    GenerateMindMap,
    GenerateQuiz,
    AskQuestion(String),
}

impl Operation {
    fn requires_ready(&self) -> bool {
        !matches!(self, Operation::SubmitDocuments)
    }
}

/// Proof that an operation was started. Hand it back to `Session::complete`.
///
/// Holds no borrow of the session, so the session can be read (and rendered)
/// while the request is awaited. There is no drop guard: `complete` is the only
/// way to clear the busy flag, so the task that holds the token must outlive the
/// request. The study page owns the session for the life of the window and its
/// spawned tasks are never cancelled, which keeps that true.
#[must_use = "a pending operation keeps the session busy until completed"]
#[derive(Debug, PartialEq, Eq)]
pub struct PendingOperation {
    operation: Operation,
}

impl PendingOperation {
    #[must_use]
    pub fn operation(&self) -> &Operation {
        &self.operation
    }
}

/// What a successful remote call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutput {
    DocumentsProcessed,
    MindMap(Option<ConceptNode>),
    Quiz(Vec<QuestionRecord>),
    Answer(String),
}

/// A failed remote call, reduced to the text shown after `"Error: "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFailure {
    pub detail: String,
}

impl OperationFailure {
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn status_message(&self) -> String {
        format!("Error: {}", self.detail)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Top-level state of the study screen.
///
/// All writes go through `begin`/`complete` and the local view transitions, so the
/// busy flag, readiness and active view stay consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    active_view: ActiveView,
    ready: bool,
    busy: bool,
    status: String,
    mind_map: Option<MindMapArtifact>,
    quiz: Option<QuizArtifact>,
    last_exchange: Option<QaExchange>,
    quiz_revision: u64,
}

/// What the active panel should show, borrowed from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveViewDescriptor<'a> {
    Placeholder(&'static str),
    MindMap(&'a MindMapArtifact),
    Quiz(&'a QuizArtifact),
    QuestionAnswer(Option<&'a QaExchange>),
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn mind_map(&self) -> Option<&MindMapArtifact> {
        self.mind_map.as_ref()
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&QuizArtifact> {
        self.quiz.as_ref()
    }

    #[must_use]
    pub fn last_exchange(&self) -> Option<&QaExchange> {
        self.last_exchange.as_ref()
    }

    /// Whether a trigger for `operation` should be enabled right now.
    #[must_use]
    pub fn can_begin(&self, operation: &Operation) -> bool {
        !self.busy && (self.ready || !operation.requires_ready())
    }

    /// Whether generation and Q&A affordances are enabled.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        self.ready && !self.busy
    }

    /// Mark `operation` as in flight.
    ///
    /// Triggers are disabled while busy, so reaching this with the session busy is a
    /// caller bug: debug builds panic, release builds reject.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Busy` if another operation is in flight,
    /// `SessionError::NotReady` if generation is attempted before a successful
    /// submission, and `SessionError::EmptyQuestion` for a blank question.
    pub fn begin(&mut self, operation: Operation) -> Result<PendingOperation, SessionError> {
        debug_assert!(!self.busy, "session is already busy; trigger should be disabled");
        if self.busy {
            return Err(SessionError::Busy);
        }
        if operation.requires_ready() && !self.ready {
            return Err(SessionError::NotReady);
        }

        let status = match &operation {
            Operation::SubmitDocuments => {
                self.ready = false;
                STATUS_PROCESSING
            }
            Operation::GenerateMindMap => STATUS_GENERATING_MIND_MAP,
            Operation::GenerateQuiz => STATUS_GENERATING_QUIZ,
            Operation::AskQuestion(question) => {
                if question.trim().is_empty() {
                    return Err(SessionError::EmptyQuestion);
                }
                STATUS_ASKING
            }
        };

        self.busy = true;
        self.status = status.to_string();
        Ok(PendingOperation { operation })
    }

    /// Apply the result of a pending operation and clear the busy flag.
    ///
    /// Failures only touch the status line (and the Q&A reply); readiness, the
    /// active view and cached artifacts are left as they were.
    pub fn complete(
        &mut self,
        pending: PendingOperation,
        result: Result<OperationOutput, OperationFailure>,
        now: DateTime<Utc>,
    ) {
        self.busy = false;

        let output = match result {
            Ok(output) => output,
            Err(failure) => {
                let message = failure.status_message();
                if let Operation::AskQuestion(question) = pending.operation {
                    self.last_exchange = Some(QaExchange {
                        question,
                        reply: QaReply::Failed(message.clone()),
                    });
                }
                self.status = message;
                return;
            }
        };

        match (pending.operation, output) {
            (Operation::SubmitDocuments, OperationOutput::DocumentsProcessed) => {
                self.ready = true;
                self.status = STATUS_PROCESSED.to_string();
            }
            (Operation::GenerateMindMap, OperationOutput::MindMap(root)) => {
                self.mind_map = Some(MindMapArtifact {
                    root,
                    generated_at: now,
                });
                self.active_view = ActiveView::MindMap;
                self.status = STATUS_MIND_MAP_READY.to_string();
            }
            (Operation::GenerateQuiz, OperationOutput::Quiz(questions)) => {
                self.quiz_revision += 1;
                self.quiz = Some(QuizArtifact {
                    questions,
                    generated_at: now,
                    revision: self.quiz_revision,
                });
                self.active_view = ActiveView::Quiz;
                self.status = STATUS_QUIZ_READY.to_string();
            }
            (Operation::AskQuestion(question), OperationOutput::Answer(answer)) => {
                self.last_exchange = Some(QaExchange {
                    question,
                    reply: QaReply::Answer(answer),
                });
                self.status = STATUS_ANSWERED.to_string();
            }
            (operation, output) => {
                debug_assert!(false, "output {output:?} does not belong to {operation:?}");
            }
        }
    }

    /// Switch to the Q&A panel. No request is made.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotReady` before a successful submission.
    pub fn activate_question_answer_view(&mut self) -> Result<(), SessionError> {
        if !self.ready {
            return Err(SessionError::NotReady);
        }
        self.active_view = ActiveView::QuestionAnswer;
        Ok(())
    }

    /// Resolve the active panel against the cached artifacts.
    ///
    /// A selected view whose artifact is missing falls back to the placeholder.
    #[must_use]
    pub fn render_active_view(&self) -> ActiveViewDescriptor<'_> {
        let placeholder = ActiveViewDescriptor::Placeholder(PLACEHOLDER_PROMPT);
        match self.active_view {
            ActiveView::None => placeholder,
            ActiveView::MindMap => match self.mind_map.as_ref() {
                Some(artifact) if artifact.root.is_some() => ActiveViewDescriptor::MindMap(artifact),
                _ => placeholder,
            },
            ActiveView::Quiz => self
                .quiz
                .as_ref()
                .map_or(placeholder, ActiveViewDescriptor::Quiz),
            ActiveView::QuestionAnswer => {
                ActiveViewDescriptor::QuestionAnswer(self.last_exchange.as_ref())
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn run(
        session: &mut Session,
        operation: Operation,
        result: Result<OperationOutput, OperationFailure>,
    ) {
        assert!(!session.is_busy());
        let pending = session.begin(operation).unwrap();
        assert!(session.is_busy());
        session.complete(pending, result, fixed_now());
        assert!(!session.is_busy());
    }

    fn ready_session() -> Session {
        let mut session = Session::new();
        run(
            &mut session,
            Operation::SubmitDocuments,
            Ok(OperationOutput::DocumentsProcessed),
        );
        session
    }

    #[test]
    fn only_complete_clears_busy() {
        let mut session = ready_session();
        let pending = session.begin(Operation::GenerateQuiz).unwrap();
        assert!(!session.can_begin(&Operation::SubmitDocuments));

        drop(pending);
        assert!(session.is_busy());
        assert!(!session.can_generate());
    }

    fn quiz(len: usize) -> Vec<QuestionRecord> {
        (0..len)
            .map(|idx| QuestionRecord::new(format!("Q{idx}"), vec!["A".into()], "A"))
            .collect()
    }

    #[test]
    fn new_session_shows_placeholder() {
        let session = Session::new();
        assert_eq!(session.active_view(), ActiveView::None);
        assert!(!session.is_ready());
        assert!(!session.is_busy());
        assert_eq!(
            session.render_active_view(),
            ActiveViewDescriptor::Placeholder(PLACEHOLDER_PROMPT)
        );
    }

    #[test]
    fn submit_sets_pending_status_and_clears_readiness() {
        let mut session = ready_session();
        let pending = session.begin(Operation::SubmitDocuments).unwrap();
        assert!(!session.is_ready());
        assert_eq!(session.status(), STATUS_PROCESSING);

        session.complete(pending, Err(OperationFailure::new("bad file")), fixed_now());
        assert!(!session.is_ready());
        assert!(!session.is_busy());
        assert_eq!(session.status(), "Error: bad file");
    }

    #[test]
    fn successful_submit_marks_ready() {
        let session = ready_session();
        assert!(session.is_ready());
        assert_eq!(session.status(), STATUS_PROCESSED);
        assert_eq!(session.active_view(), ActiveView::None);
    }

    #[test]
    fn generation_requires_ready() {
        let mut session = Session::new();
        assert!(!session.can_begin(&Operation::GenerateQuiz));
        assert_eq!(
            session.begin(Operation::GenerateQuiz).unwrap_err(),
            SessionError::NotReady
        );
        assert_eq!(
            session.activate_question_answer_view().unwrap_err(),
            SessionError::NotReady
        );
        assert!(!session.is_busy());
    }

    #[test]
    fn generation_failure_keeps_view_and_readiness() {
        let mut session = ready_session();
        run(
            &mut session,
            Operation::GenerateQuiz,
            Ok(OperationOutput::Quiz(quiz(2))),
        );
        run(
            &mut session,
            Operation::GenerateMindMap,
            Err(OperationFailure::new("no documents processed")),
        );

        assert_eq!(session.status(), "Error: no documents processed");
        assert_eq!(session.active_view(), ActiveView::Quiz);
        assert!(session.is_ready());
        assert!(session.mind_map().is_none());
    }

    #[test]
    fn artifacts_survive_view_switches() {
        let mut session = ready_session();
        run(
            &mut session,
            Operation::GenerateMindMap,
            Ok(OperationOutput::MindMap(Some(ConceptNode::leaf("Root")))),
        );
        run(
            &mut session,
            Operation::GenerateQuiz,
            Ok(OperationOutput::Quiz(quiz(1))),
        );
        session.activate_question_answer_view().unwrap();

        assert_eq!(session.active_view(), ActiveView::QuestionAnswer);
        assert!(session.mind_map().is_some());
        assert!(session.quiz().is_some());
        assert_eq!(
            session.render_active_view(),
            ActiveViewDescriptor::QuestionAnswer(None)
        );
    }

    #[test]
    fn each_quiz_gets_new_revision() {
        let mut session = ready_session();
        run(&mut session, Operation::GenerateQuiz, Ok(OperationOutput::Quiz(quiz(1))));
        let first = session.quiz().unwrap().revision();
        run(&mut session, Operation::GenerateQuiz, Ok(OperationOutput::Quiz(quiz(1))));
        let second = session.quiz().unwrap().revision();
        assert!(second > first);
        assert_eq!(session.quiz().unwrap().generated_at(), fixed_now());
    }

    #[test]
    fn missing_mind_map_root_falls_back_to_placeholder() {
        let mut session = ready_session();
        run(
            &mut session,
            Operation::GenerateMindMap,
            Ok(OperationOutput::MindMap(None)),
        );
        assert_eq!(session.active_view(), ActiveView::MindMap);
        assert_eq!(
            session.render_active_view(),
            ActiveViewDescriptor::Placeholder(PLACEHOLDER_PROMPT)
        );
    }

    #[test]
    fn blank_question_is_rejected_without_going_busy() {
        let mut session = ready_session();
        let err = session
            .begin(Operation::AskQuestion("   ".into()))
            .unwrap_err();
        assert_eq!(err, SessionError::EmptyQuestion);
        assert!(!session.is_busy());
    }

    #[test]
    fn question_failure_is_recorded_as_reply() {
        let mut session = ready_session();
        session.activate_question_answer_view().unwrap();
        run(
            &mut session,
            Operation::AskQuestion("What?".into()),
            Err(OperationFailure::new("model offline")),
        );

        let exchange = session.last_exchange().unwrap();
        assert_eq!(exchange.question, "What?");
        assert_eq!(exchange.reply, QaReply::Failed("Error: model offline".into()));
        assert!(session.is_ready());
    }

    #[test]
    fn question_answer_is_stored() {
        let mut session = ready_session();
        run(
            &mut session,
            Operation::AskQuestion("Why?".into()),
            Ok(OperationOutput::Answer("Because.".into())),
        );
        assert_eq!(session.status(), STATUS_ANSWERED);
        assert_eq!(
            session.last_exchange().map(|exchange| &exchange.reply),
            Some(&QaReply::Answer("Because.".into()))
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already busy")]
    fn beginning_while_busy_fails_loudly_in_debug() {
        let mut session = ready_session();
        let _pending = session.begin(Operation::GenerateQuiz).unwrap();
        let _ = session.begin(Operation::GenerateMindMap);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn beginning_while_busy_is_rejected_in_release() {
        let mut session = ready_session();
        let _pending = session.begin(Operation::GenerateQuiz).unwrap();
        assert_eq!(
            session.begin(Operation::GenerateMindMap).unwrap_err(),
            SessionError::Busy
        );
    }
}
