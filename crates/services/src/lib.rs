#![forbid(unsafe_code)]

pub mod error;
pub mod scripted;
pub mod session_controller;
pub mod study_api;
pub mod upload;

pub use study_core::Clock;

pub use error::StudyApiError;
pub use scripted::{BackendCall, Endpoint, ScriptedBackend};
pub use session_controller::{FileSource, SessionController, SessionRequest};
pub use study_api::{StudyApiClient, StudyApiConfig, StudyBackend};
pub use upload::{UploadFile, UploadPart, UploadSubmission};
