use study_core::model::SessionError;

/// A user action the session refused to start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Busy,
    NotReady,
    EmptyQuestion,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Busy => "Please wait for the current request to finish.",
            ViewError::NotReady => "Process your documents first.",
            ViewError::EmptyQuestion => "Type a question first.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<SessionError> for ViewError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Busy => ViewError::Busy,
            SessionError::NotReady => ViewError::NotReady,
            SessionError::EmptyQuestion => ViewError::EmptyQuestion,
            _ => ViewError::Unknown,
        }
    }
}
