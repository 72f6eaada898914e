use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use study_core::model::{ConceptNode, MindMapPayload, QuestionRecord};

use crate::error::StudyApiError;
use crate::upload::UploadSubmission;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const UPLOAD_DOCS_PATH: &str = "upload-docs";
const MIND_MAP_PATH: &str = "generate-mindmap";
const QUIZ_PATH: &str = "generate-quiz";
const ASK_PATH: &str = "ask-question";
const QUESTION_FIELD: &str = "question";

/// The remote service that ingests documents and generates study material.
#[async_trait]
pub trait StudyBackend: Send + Sync {
    async fn upload_documents(&self, submission: UploadSubmission) -> Result<(), StudyApiError>;

    /// `Ok(None)` when the service answers with `null`.
    async fn generate_mind_map(&self) -> Result<Option<ConceptNode>, StudyApiError>;

    async fn generate_quiz(&self) -> Result<Vec<QuestionRecord>, StudyApiError>;

    async fn ask_question(&self, question: &str) -> Result<String, StudyApiError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudyApiConfig {
    pub base_url: Url,
    pub request_timeout: Option<Duration>,
}

impl StudyApiConfig {
    /// # Errors
    ///
    /// Returns `StudyApiError::InvalidUrl` if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, StudyApiError> {
        let mut base_url = Url::parse(base_url.trim())?;
        // Endpoints are joined relative to the base, which needs a trailing slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            request_timeout: None,
        })
    }

    /// Read `STUDY_API_BASE_URL` and `STUDY_API_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is set to an unusable value.
    pub fn from_env() -> Result<Self, StudyApiError> {
        let base_url = env::var("STUDY_API_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let config = Self::new(&base_url)?;
        match env::var("STUDY_API_TIMEOUT_SECS") {
            Ok(raw) if !raw.trim().is_empty() => {
                let secs = parse_timeout_secs(&raw)?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            _ => Ok(config),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, StudyApiError> {
        Ok(self.base_url.join(path)?)
    }
}

/// # Errors
///
/// Returns `StudyApiError::InvalidTimeout` unless `raw` is a positive integer.
pub fn parse_timeout_secs(raw: &str) -> Result<u64, StudyApiError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| StudyApiError::InvalidTimeout {
            raw: raw.to_string(),
        })
}

/// `StudyBackend` over HTTP.
#[derive(Clone)]
pub struct StudyApiClient {
    client: Client,
    config: StudyApiConfig,
}

impl StudyApiClient {
    /// # Errors
    ///
    /// Returns `StudyApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: StudyApiConfig) -> Result<Self, StudyApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &StudyApiConfig {
        &self.config
    }

    async fn send_for_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, StudyApiError> {
        let body = self.send(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, StudyApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = error_detail(&body);
            tracing::warn!(%status, detail = detail.as_deref(), "study service rejected request");
            return Err(StudyApiError::Server { status, detail });
        }

        Ok(body.to_vec())
    }
}

#[async_trait]
impl StudyBackend for StudyApiClient {
    async fn upload_documents(&self, submission: UploadSubmission) -> Result<(), StudyApiError> {
        let url = self.config.endpoint(UPLOAD_DOCS_PATH)?;
        tracing::debug!(
            files = submission.files().len(),
            has_media_url = submission.media_url().is_some(),
            "uploading documents"
        );
        let request = self.client.post(url).multipart(submission.into_form());
        self.send(request).await?;
        Ok(())
    }

    async fn generate_mind_map(&self) -> Result<Option<ConceptNode>, StudyApiError> {
        let url = self.config.endpoint(MIND_MAP_PATH)?;
        let payload: Option<MindMapPayload> = self.send_for_json(self.client.get(url)).await?;
        Ok(payload.map(MindMapPayload::into_root))
    }

    async fn generate_quiz(&self) -> Result<Vec<QuestionRecord>, StudyApiError> {
        let url = self.config.endpoint(QUIZ_PATH)?;
        let items: Option<Vec<QuizItem>> = self.send_for_json(self.client.get(url)).await?;
        Ok(quiz_questions(items))
    }

    async fn ask_question(&self, question: &str) -> Result<String, StudyApiError> {
        let url = self.config.endpoint(ASK_PATH)?;
        let form = reqwest::multipart::Form::new().text(QUESTION_FIELD, question.to_string());
        let body: AnswerResponse = self
            .send_for_json(self.client.post(url).multipart(form))
            .await?;
        Ok(body.answer.unwrap_or_default())
    }
}

/// A quiz list entry; anything that is not an object is dropped.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuizItem {
    Question(QuestionRecord),
    Other(serde::de::IgnoredAny),
}

fn quiz_questions(items: Option<Vec<QuizItem>>) -> Vec<QuestionRecord> {
    items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| match item {
            QuizItem::Question(question) => Some(question),
            QuizItem::Other(_) => None,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct AnswerResponse {
    #[serde(default)]
    answer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Pull a human-readable `detail` out of an error body, if there is one.
fn error_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorResponse = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) if text.trim().is_empty() => None,
        serde_json::Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}
