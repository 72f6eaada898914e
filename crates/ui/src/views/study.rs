use std::path::PathBuf;

use dioxus::prelude::*;
use services::{FileSource, SessionRequest};
use study_core::model::{ActiveViewDescriptor, Session};

use crate::context::AppContext;
use crate::views::{MindMapView, QuestionAnswerView, QuizView, UploaderForm, ViewError};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Status text while a request is in flight.
const LOADING_STATUS: &str = "Loading...";

#[component]
pub fn StudyView() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = ctx.controller();
    let preset_files = ctx.preset_files().to_vec();
    let preset_media_url = ctx.preset_media_url().map(str::to_string);

    let session = use_signal(Session::new);
    let rejection = use_signal(|| None::<ViewError>);

    let dispatch = use_callback(move |request: SessionRequest| {
        let mut session = session;
        let mut rejection = rejection;
        let operation = request.operation();

        // Triggers are disabled in these states; late clicks land here.
        if !session.read().can_begin(&operation) {
            tracing::debug!(?operation, "ignoring request while session is unavailable");
            return;
        }
        let pending = match session.write().begin(operation) {
            Ok(pending) => pending,
            Err(err) => {
                rejection.set(Some(err.into()));
                return;
            }
        };
        rejection.set(None);

        let controller = controller.clone();
        spawn(async move {
            let result = controller.execute(request).await;
            session.write().complete(pending, result, controller.now());
        });
    });

    let on_submit = move |(files, media_url): (Vec<PathBuf>, Option<String>)| {
        dispatch.call(SessionRequest::SubmitDocuments {
            files: files.into_iter().map(FileSource::from).collect(),
            media_url,
        });
    };
    let show_question_answer = move |_: MouseEvent| {
        let mut session = session;
        let mut rejection = rejection;
        let result = session.write().activate_question_answer_view();
        rejection.set(result.err().map(ViewError::from));
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<StudyTestHandles>() {
                handles.register(dispatch, session);
            }
        }
    }

    let session_guard = session.read();
    let busy = session_guard.is_busy();
    let can_generate = session_guard.can_generate();
    let status_line = if busy {
        LOADING_STATUS.to_string()
    } else {
        session_guard.status().to_string()
    };

    let panel = match session_guard.render_active_view() {
        ActiveViewDescriptor::Placeholder(prompt) => rsx! {
            p { class: "study-placeholder", "{prompt}" }
        },
        ActiveViewDescriptor::MindMap(artifact) => rsx! {
            MindMapView { artifact: artifact.clone() }
        },
        ActiveViewDescriptor::Quiz(artifact) => rsx! {
            QuizView { key: "{artifact.revision()}", artifact: artifact.clone() }
        },
        ActiveViewDescriptor::QuestionAnswer(exchange) => rsx! {
            QuestionAnswerView {
                exchange: exchange.cloned(),
                busy,
                on_ask: move |question: String| dispatch.call(SessionRequest::AskQuestion(question)),
            }
        },
    };

    rsx! {
        div { class: "page study-page",
            UploaderForm {
                preset_files,
                preset_media_url,
                busy,
                on_submit,
            }
            if !status_line.is_empty() {
                p { class: "status-line", id: "study-status", role: "status", "{status_line}" }
            }
            if let Some(err) = *rejection.read() {
                p { class: "study-notice", "{err.message()}" }
            }
            nav { class: "action-bar",
                button {
                    class: "btn btn-secondary",
                    id: "action-mind-map",
                    r#type: "button",
                    disabled: !can_generate,
                    onclick: move |_| dispatch.call(SessionRequest::GenerateMindMap),
                    "Generate Mind Map"
                }
                button {
                    class: "btn btn-secondary",
                    id: "action-quiz",
                    r#type: "button",
                    disabled: !can_generate,
                    onclick: move |_| dispatch.call(SessionRequest::GenerateQuiz),
                    "Generate Quiz"
                }
                button {
                    class: "btn btn-secondary",
                    id: "action-ask",
                    r#type: "button",
                    disabled: !can_generate,
                    onclick: show_question_answer,
                    "Ask a Question"
                }
            }
            div { class: "study-panel", {panel} }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct StudyTestHandles {
    dispatch: Rc<RefCell<Option<Callback<SessionRequest>>>>,
    session: Rc<RefCell<Option<Signal<Session>>>>,
}

#[cfg(test)]
impl StudyTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<SessionRequest>, session: Signal<Session>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<SessionRequest> {
        (*self.dispatch.borrow()).expect("study dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<Session> {
        (*self.session.borrow()).expect("study session registered")
    }
}
