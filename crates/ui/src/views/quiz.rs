use dioxus::prelude::*;
use study_core::model::QuizArtifact;

use crate::vm::{QuizScreen, QuizVm, generated_caption};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Runs one quiz over `artifact`. Mount it keyed by the artifact revision so a
/// new quiz starts from the first question.
#[component]
pub fn QuizView(artifact: QuizArtifact) -> Element {
    let mut vm = use_signal(|| QuizVm::new(artifact.questions()));

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(vm);
            }
        }
    }

    let caption = generated_caption(artifact.generated_at());
    let screen = vm.read().screen();

    rsx! {
        section { class: "quiz",
            h2 { class: "quiz__title", "Quiz" }
            p { class: "artifact-caption", "{caption}" }
            match screen {
                QuizScreen::NoQuiz => rsx! {
                    p { class: "quiz__empty", "No quiz available." }
                },
                QuizScreen::InProgress { position_label, prompt, options } => rsx! {
                    p { class: "quiz__position", "{position_label}" }
                    h3 { class: "quiz__prompt", "{prompt}" }
                    div { class: "quiz__options", role: "radiogroup",
                        for (index, option) in options.into_iter().enumerate() {
                            QuizOption {
                                key: "{index}",
                                value: option.value,
                                selected: option.selected,
                                on_select: move |value: String| vm.write().select(value),
                            }
                        }
                    }
                    button {
                        class: "btn btn-primary",
                        id: "quiz-next",
                        r#type: "button",
                        onclick: move |_| {
                            if let Some(outcome) = vm.write().submit() {
                                tracing::debug!(?outcome, "quiz answer submitted");
                            }
                        },
                        "Next"
                    }
                },
                QuizScreen::Finished { score_label } => rsx! {
                    div { class: "quiz__finished",
                        h3 { "Quiz Finished" }
                        p { class: "quiz__score", "{score_label}" }
                    }
                },
            }
        }
    }
}

#[component]
fn QuizOption(value: String, selected: bool, on_select: EventHandler<String>) -> Element {
    let choice = value.clone();
    rsx! {
        label { class: "quiz-option",
            input {
                r#type: "radio",
                name: "quiz-option",
                value: "{value}",
                checked: selected,
                onchange: move |_| on_select.call(choice.clone()),
            }
            span { class: "quiz-option__text", "{value}" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    vm: Rc<RefCell<Option<Signal<QuizVm>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    /// Each mounted quiz panel replaces the previous registration.
    pub(crate) fn register(&self, vm: Signal<QuizVm>) {
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn vm(&self) -> Signal<QuizVm> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
