//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while talking to the study service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyApiError {
    #[error("Request failed with status code {}", .status.as_u16())]
    Server {
        status: reqwest::StatusCode,
        detail: Option<String>,
    },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid service url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid timeout value: {raw}")]
    InvalidTimeout { raw: String },
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl StudyApiError {
    /// Text shown to the user after `"Error: "`.
    ///
    /// A server-supplied detail is passed through verbatim; everything else falls
    /// back to the error's own description.
    #[must_use]
    pub fn status_detail(&self) -> String {
        match self {
            StudyApiError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.to_string(),
        }
    }
}
