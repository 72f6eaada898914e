use study_core::model::{AnswerOutcome, QuestionRecord, QuizSession};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptionVm {
    pub value: String,
    pub selected: bool,
}

/// What the quiz panel shows right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    NoQuiz,
    InProgress {
        position_label: String,
        prompt: String,
        options: Vec<QuizOptionVm>,
    },
    Finished {
        score_label: String,
    },
}

/// Quiz panel state. An empty question list never starts a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    session: Option<QuizSession>,
}

impl QuizVm {
    #[must_use]
    pub fn new(questions: &[QuestionRecord]) -> Self {
        Self {
            session: QuizSession::new(questions.to_vec()).ok(),
        }
    }

    #[must_use]
    pub fn has_quiz(&self) -> bool {
        self.session.is_some()
    }

    pub fn select(&mut self, value: impl Into<String>) {
        if let Some(session) = self.session.as_mut() {
            // Rejected once finished; the finished screen has no options to click.
            let _ = session.select_option(value);
        }
    }

    /// `None` when there is nothing to submit to.
    pub fn submit(&mut self) -> Option<AnswerOutcome> {
        self.session.as_mut()?.submit_answer().ok()
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        let Some(session) = self.session.as_ref() else {
            return QuizScreen::NoQuiz;
        };
        let progress = session.progress();
        let Some(question) = session.current_question() else {
            return QuizScreen::Finished {
                score_label: format!("Score: {} / {}", progress.score, progress.total),
            };
        };

        let selected = session.selected_option();
        QuizScreen::InProgress {
            position_label: format!("Question {} of {}", progress.position, progress.total),
            prompt: question.question().to_string(),
            options: question
                .options()
                .iter()
                .map(|value| QuizOptionVm {
                    value: value.clone(),
                    selected: selected == Some(value.as_str()),
                })
                .collect(),
        }
    }
}
