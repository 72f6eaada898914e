//! In-memory `StudyBackend` with canned responses and injectable failures.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::StatusCode;

use study_core::model::{ConceptNode, QuestionRecord};

use crate::error::StudyApiError;
use crate::study_api::StudyBackend;
use crate::upload::UploadSubmission;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Upload,
    MindMap,
    Quiz,
    Ask,
}

/// A call observed by the backend, in arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendCall {
    Upload {
        file_names: Vec<String>,
        media_url: Option<String>,
    },
    MindMap,
    Quiz,
    Ask(String),
}

#[derive(Default)]
struct ScriptState {
    mind_map: Option<ConceptNode>,
    quiz: Vec<QuestionRecord>,
    answer: String,
    failures: HashMap<Endpoint, Option<String>>,
    calls: Vec<BackendCall>,
}

#[derive(Default)]
pub struct ScriptedBackend {
    state: Mutex<ScriptState>,
}

impl ScriptedBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mind_map(self, root: ConceptNode) -> Self {
        self.lock().mind_map = Some(root);
        self
    }

    #[must_use]
    pub fn with_quiz(self, questions: Vec<QuestionRecord>) -> Self {
        self.lock().quiz = questions;
        self
    }

    #[must_use]
    pub fn with_answer(self, answer: impl Into<String>) -> Self {
        self.lock().answer = answer.into();
        self
    }

    /// Make `endpoint` answer with a server error, optionally carrying `detail`.
    pub fn fail(&self, endpoint: Endpoint, detail: Option<&str>) {
        self.lock()
            .failures
            .insert(endpoint, detail.map(str::to_string));
    }

    pub fn recover(&self, endpoint: Endpoint) {
        self.lock().failures.remove(&endpoint);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, endpoint: Endpoint, call: BackendCall) -> Result<(), StudyApiError> {
        let mut state = self.lock();
        state.calls.push(call);
        match state.failures.get(&endpoint) {
            Some(detail) => Err(StudyApiError::Server {
                status: StatusCode::BAD_REQUEST,
                detail: detail.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StudyBackend for ScriptedBackend {
    async fn upload_documents(&self, submission: UploadSubmission) -> Result<(), StudyApiError> {
        let call = BackendCall::Upload {
            file_names: submission
                .files()
                .iter()
                .map(|file| file.file_name().to_string())
                .collect(),
            media_url: submission.media_url().map(str::to_string),
        };
        self.record(Endpoint::Upload, call)
    }

    async fn generate_mind_map(&self) -> Result<Option<ConceptNode>, StudyApiError> {
        self.record(Endpoint::MindMap, BackendCall::MindMap)?;
        Ok(self.lock().mind_map.clone())
    }

    async fn generate_quiz(&self) -> Result<Vec<QuestionRecord>, StudyApiError> {
        self.record(Endpoint::Quiz, BackendCall::Quiz)?;
        Ok(self.lock().quiz.clone())
    }

    async fn ask_question(&self, question: &str) -> Result<String, StudyApiError> {
        self.record(Endpoint::Ask, BackendCall::Ask(question.to_string()))?;
        Ok(self.lock().answer.clone())
    }
}
