use dioxus::prelude::*;
use study_core::model::{QaExchange, QaReply};

use crate::vm::markdown_to_html;

#[component]
pub fn QuestionAnswerView(
    exchange: Option<QaExchange>,
    busy: bool,
    on_ask: EventHandler<String>,
) -> Element {
    let mut question = use_signal(String::new);
    let can_ask = !busy && !question.read().trim().is_empty();
    let ask_label = if busy { "Asking..." } else { "Ask" };

    rsx! {
        section { class: "qa",
            h2 { class: "qa__title", "Ask a Question" }
            div { class: "qa__form",
                input {
                    class: "qa__input",
                    id: "qa-question",
                    r#type: "text",
                    placeholder: "Ask a question about your documents...",
                    value: "{question}",
                    oninput: move |evt| question.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    id: "qa-ask",
                    r#type: "button",
                    disabled: !can_ask,
                    onclick: move |_| {
                        let text = question.read().trim().to_string();
                        if !text.is_empty() {
                            on_ask.call(text);
                        }
                    },
                    "{ask_label}"
                }
            }
            if let Some(exchange) = exchange {
                div { class: "qa__exchange",
                    p { class: "qa__asked", "Q: {exchange.question}" }
                    match exchange.reply {
                        QaReply::Answer(answer) => rsx! {
                            div { class: "qa__answer", dangerous_inner_html: markdown_to_html(&answer) }
                        },
                        QaReply::Failed(message) => rsx! {
                            p { class: "qa__error", "{message}" }
                        },
                    }
                }
            }
        }
    }
}
