use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::error::StudyApiError;

/// Repeated multipart field carrying each document.
pub const FILES_FIELD: &str = "files";
/// Single multipart field carrying the external media link.
pub const MEDIA_URL_FIELD: &str = "youtube_url";

/// A local document ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    file_name: String,
    bytes: Vec<u8>,
}

impl UploadFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a document from disk, keeping only its file name for the upload.
    ///
    /// # Errors
    ///
    /// Returns `StudyApiError::ReadFile` if the file cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self, StudyApiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| StudyApiError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        Ok(Self { file_name, bytes })
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One field of the multipart body, in send order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPart<'a> {
    File {
        field: &'static str,
        file_name: &'a str,
        len: usize,
    },
    Text {
        field: &'static str,
        value: &'a str,
    },
}

/// Documents plus an optional media link, in the user's selection order.
///
/// Building never fails and an empty submission is still a valid body; the
/// service decides whether it is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSubmission {
    files: Vec<UploadFile>,
    media_url: Option<String>,
}

impl UploadSubmission {
    #[must_use]
    pub fn build(files: Vec<UploadFile>, media_url: Option<&str>) -> Self {
        let media_url = media_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string);
        Self { files, media_url }
    }

    #[must_use]
    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    #[must_use]
    pub fn media_url(&self) -> Option<&str> {
        self.media_url.as_deref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.media_url.is_none()
    }

    #[must_use]
    pub fn parts(&self) -> Vec<UploadPart<'_>> {
        let mut parts: Vec<_> = self
            .files
            .iter()
            .map(|file| UploadPart::File {
                field: FILES_FIELD,
                file_name: file.file_name(),
                len: file.len(),
            })
            .collect();
        if let Some(url) = self.media_url.as_deref() {
            parts.push(UploadPart::Text {
                field: MEDIA_URL_FIELD,
                value: url,
            });
        }
        parts
    }

    #[must_use]
    pub fn into_form(self) -> Form {
        let mut form = Form::new();
        for file in self.files {
            form = form.part(FILES_FIELD, Part::bytes(file.bytes).file_name(file.file_name));
        }
        if let Some(url) = self.media_url {
            form = form.text(MEDIA_URL_FIELD, url);
        }
        form
    }
}
