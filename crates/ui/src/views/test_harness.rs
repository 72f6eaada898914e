use std::path::PathBuf;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{Clock, ScriptedBackend, SessionController, SessionRequest};
use study_core::model::Session;
use study_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::StudyView;
use crate::views::quiz::QuizTestHandles;
use crate::views::study::StudyTestHandles;
use crate::vm::QuizVm;

struct TestApp {
    controller: SessionController,
    preset_files: Vec<PathBuf>,
}

impl UiApp for TestApp {
    fn session_controller(&self) -> SessionController {
        self.controller.clone()
    }

    fn preset_files(&self) -> Vec<PathBuf> {
        self.preset_files.clone()
    }

    fn preset_media_url(&self) -> Option<String> {
        None
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: StudyTestHandles,
    quiz_handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    use_context_provider(|| props.quiz_handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { StudyView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: Arc<ScriptedBackend>,
    handles: StudyTestHandles,
    quiz_handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Send `request` through the view's dispatcher and let the request finish.
    pub async fn dispatch(&mut self, request: SessionRequest) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(request));
        self.drive_async().await;
        self.drive_async().await;
    }

    pub fn session(&self) -> Session {
        let session = self.handles.session();
        self.dom.in_runtime(|| session.read().clone())
    }

    pub fn update_session(&mut self, update: impl FnOnce(&mut Session)) {
        let mut session = self.handles.session();
        self.dom.in_runtime(|| update(&mut session.write()));
        drive_dom(&mut self.dom);
    }

    /// Drive the currently mounted quiz panel.
    pub fn update_quiz(&mut self, update: impl FnOnce(&mut QuizVm)) {
        let mut vm = self.quiz_handles.vm();
        self.dom.in_runtime(|| update(&mut vm.write()));
        drive_dom(&mut self.dom);
    }

    pub fn quiz(&self) -> QuizVm {
        let vm = self.quiz_handles.vm();
        self.dom.in_runtime(|| vm.read().clone())
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(backend: ScriptedBackend, preset_files: Vec<PathBuf>) -> ViewHarness {
    let backend = Arc::new(backend);
    let controller = SessionController::new(backend.clone(), Clock::fixed(fixed_now()));
    let handles = StudyTestHandles::default();
    let quiz_handles = QuizTestHandles::default();
    let app = Arc::new(TestApp {
        controller,
        preset_files,
    });

    let mut harness = ViewHarness {
        dom: VirtualDom::new_with_props(
            ViewRouterHarness,
            ViewHarnessProps {
                app,
                handles: handles.clone(),
                quiz_handles: quiz_handles.clone(),
            },
        ),
        backend,
        handles,
        quiz_handles,
    };
    harness.rebuild();
    harness
}
