use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use study_core::model::{
    Operation, OperationFailure, OperationOutput, Session, SessionError,
};

use crate::Clock;
use crate::error::StudyApiError;
use crate::study_api::StudyBackend;
use crate::upload::{UploadFile, UploadSubmission};

/// A document chosen by the user: a path still to be read, or bytes already in hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    Loaded(UploadFile),
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<UploadFile> for FileSource {
    fn from(file: UploadFile) -> Self {
        Self::Loaded(file)
    }
}

/// A user intent together with the data its remote call needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRequest {
    SubmitDocuments {
        files: Vec<FileSource>,
        media_url: Option<String>,
    },
    GenerateMindMap,
    GenerateQuiz,
    AskQuestion(String),
}

impl SessionRequest {
    /// The session-level operation. A question is trimmed here so the recorded
    /// exchange matches what is sent.
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            SessionRequest::SubmitDocuments { .. } => Operation::SubmitDocuments,
            SessionRequest::GenerateMindMap => Operation::GenerateMindMap,
            SessionRequest::GenerateQuiz => Operation::GenerateQuiz,
            SessionRequest::AskQuestion(question) => {
                Operation::AskQuestion(question.trim().to_string())
            }
        }
    }
}

/// Sequences remote calls on behalf of a `Session`.
///
/// The session itself stays with the caller: `begin` on the session, `execute`
/// here, then `complete` on the session. `run` does all three for callers that
/// own the session across the await.
#[derive(Clone)]
pub struct SessionController {
    backend: Arc<dyn StudyBackend>,
    clock: Clock,
}

impl SessionController {
    #[must_use]
    pub fn new(backend: Arc<dyn StudyBackend>, clock: Clock) -> Self {
        Self { backend, clock }
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Begin, execute and complete `request` against `session`.
    ///
    /// Remote failures end up in the session's status line, not in the return value.
    ///
    /// # Errors
    ///
    /// Returns the session's rejection if the operation cannot start (busy, not
    /// ready, blank question); nothing is sent in that case.
    pub async fn run(
        &self,
        session: &mut Session,
        request: SessionRequest,
    ) -> Result<(), SessionError> {
        let pending = session.begin(request.operation())?;
        let result = self.execute(request).await;
        session.complete(pending, result, self.now());
        Ok(())
    }

    /// Perform the remote half of an operation. Every error is folded into an
    /// `OperationFailure`; there is no retry.
    pub async fn execute(
        &self,
        request: SessionRequest,
    ) -> Result<OperationOutput, OperationFailure> {
        let operation = request.operation();
        tracing::info!(?operation, "starting study operation");

        match self.dispatch(request).await {
            Ok(output) => {
                tracing::info!(?operation, "study operation finished");
                Ok(output)
            }
            Err(err) => {
                tracing::warn!(?operation, error = %err, "study operation failed");
                Err(OperationFailure::new(err.status_detail()))
            }
        }
    }

    async fn dispatch(&self, request: SessionRequest) -> Result<OperationOutput, StudyApiError> {
        match request {
            SessionRequest::SubmitDocuments { files, media_url } => {
                let files = load_files(files).await?;
                let submission = UploadSubmission::build(files, media_url.as_deref());
                self.backend.upload_documents(submission).await?;
                Ok(OperationOutput::DocumentsProcessed)
            }
            SessionRequest::GenerateMindMap => {
                let root = self.backend.generate_mind_map().await?;
                Ok(OperationOutput::MindMap(root))
            }
            SessionRequest::GenerateQuiz => {
                let questions = self.backend.generate_quiz().await?;
                Ok(OperationOutput::Quiz(questions))
            }
            SessionRequest::AskQuestion(question) => {
                let answer = self.backend.ask_question(question.trim()).await?;
                Ok(OperationOutput::Answer(answer.trim().to_string()))
            }
        }
    }
}

async fn load_files(files: Vec<FileSource>) -> Result<Vec<UploadFile>, StudyApiError> {
    let mut loaded = Vec::with_capacity(files.len());
    for file in files {
        let file = match file {
            FileSource::Path(path) => UploadFile::from_path(&path).await?,
            FileSource::Loaded(file) => file,
        };
        loaded.push(file);
    }
    Ok(loaded)
}
