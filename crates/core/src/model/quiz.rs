use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for quiz")]
    Empty,

    #[error("quiz already finished")]
    Finished,
}

//
// ─── QUESTION RECORD ───────────────────────────────────────────────────────────
//

/// One multiple-choice item as delivered by the generator.
///
/// The designated answer is expected to be one of `options`; that is the
/// generator's contract and is not checked here. Missing, null or non-string
/// fields read as empty, and non-string options are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionRecord {
    #[serde(default, deserialize_with = "text_or_empty")]
    question: String,
    #[serde(default, deserialize_with = "options_or_empty")]
    options: Vec<String>,
    #[serde(default, rename = "correctAnswer", deserialize_with = "text_or_none")]
    correct_answer: Option<String>,
}

impl QuestionRecord {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            options,
            correct_answer: Some(correct_answer.into()),
        }
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> Option<&str> {
        self.correct_answer.as_deref()
    }

    /// Exact, case-sensitive comparison against the designated answer.
    #[must_use]
    pub fn is_correct(&self, selected: &str) -> bool {
        self.correct_answer.as_deref() == Some(selected)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Text {
    Text(String),
    Other(IgnoredAny),
}

impl Text {
    fn into_option(self) -> Option<String> {
        match self {
            Text::Text(text) => Some(text),
            Text::Other(_) => None,
        }
    }
}

fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Text::deserialize(deserializer)?.into_option())
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_or_none(deserializer)?.unwrap_or_default())
}

fn options_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Options {
        List(Vec<Text>),
        Other(IgnoredAny),
    }

    Ok(match Options::deserialize(deserializer)? {
        Options::List(options) => options.into_iter().filter_map(Text::into_option).collect(),
        Options::Other(_) => Vec::new(),
    })
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// Result of a `submit_answer` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Nothing was selected; the session is unchanged.
    NoSelection,
    /// The answer was recorded and the next question is current.
    Advanced { correct: bool },
    /// The last answer was recorded and the quiz is over.
    Finished { correct: bool, score: usize, total: usize },
}

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub position: usize,
    pub total: usize,
    pub score: usize,
    pub is_finished: bool,
}

/// One pass through an ordered question list.
///
/// The index only moves forward, the score only grows, and `finished` flips
/// exactly when the last question is answered. A finished session is terminal.
#[derive(Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<QuestionRecord>,
    current: usize,
    selected: Option<String>,
    score: usize,
    finished: bool,
}

impl QuizSession {
    /// Start a session at the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if there are no questions.
    pub fn new(questions: Vec<QuestionRecord>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }

        Ok(Self {
            questions,
            current: 0,
            selected: None,
            score: 0,
            finished: false,
        })
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based index of the question being answered (or last answered once finished).
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        if self.finished {
            return None;
        }
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            position: self.current + 1,
            total: self.total_questions(),
            score: self.score,
            is_finished: self.finished,
        }
    }

    /// Replace the in-progress selection.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` once the last answer has been submitted.
    pub fn select_option(&mut self, value: impl Into<String>) -> Result<(), QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }
        self.selected = Some(value.into());
        Ok(())
    }

    /// Score the current selection, then advance or finish.
    ///
    /// Scoring happens before the terminal transition so the last answer always counts.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` if the session is already over.
    pub fn submit_answer(&mut self) -> Result<AnswerOutcome, QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }
        let Some(selected) = self.selected.as_deref() else {
            return Ok(AnswerOutcome::NoSelection);
        };

        let correct = self
            .questions
            .get(self.current)
            .is_some_and(|question| question.is_correct(selected));
        if correct {
            self.score += 1;
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
            Ok(AnswerOutcome::Advanced { correct })
        } else {
            self.finished = true;
            Ok(AnswerOutcome::Finished {
                correct,
                score: self.score,
                total: self.questions.len(),
            })
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("selected", &self.selected)
            .field("score", &self.score)
            .field("finished", &self.finished)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
