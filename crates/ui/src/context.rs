use std::path::PathBuf;
use std::sync::Arc;

use services::SessionController;

pub trait UiApp: Send + Sync {
    fn session_controller(&self) -> SessionController;

    /// Documents picked on the command line, shown pre-filled in the uploader.
    fn preset_files(&self) -> Vec<PathBuf>;
    fn preset_media_url(&self) -> Option<String>;
}

#[derive(Clone)]
pub struct AppContext {
    controller: SessionController,
    preset_files: Arc<[PathBuf]>,
    preset_media_url: Option<String>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            controller: app.session_controller(),
            preset_files: app.preset_files().into(),
            preset_media_url: app.preset_media_url(),
        }
    }

    #[must_use]
    pub fn controller(&self) -> SessionController {
        self.controller.clone()
    }

    #[must_use]
    pub fn preset_files(&self) -> &[PathBuf] {
        &self.preset_files
    }

    #[must_use]
    pub fn preset_media_url(&self) -> Option<&str> {
        self.preset_media_url.as_deref()
    }
}

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
