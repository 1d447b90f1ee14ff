use super::domain::{whole_number, AnswerField, AnswerRecord, AnswerSheet, AnswerValue, RecordError};
use super::questionnaire::{Question, QuestionKind, Questionnaire};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

/// A user's reply to the current question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AnswerInput {
    /// Zero-based index into the question's options.
    Choice(usize),
    Number(f64),
    Checkboxes(BTreeMap<AnswerField, bool>),
}

impl AnswerInput {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Choice(_) => "single choice",
            Self::Number(_) => "numeric",
            Self::Checkboxes(_) => "checkbox group",
        }
    }
}

/// Recoverable problems with the current answer. The user is re-prompted and nothing
/// already entered is lost.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("please answer this question to continue")]
    MissingAnswer { question_id: u16 },
    #[error("this question expects a {expected} answer, not a {received} answer")]
    WrongInput {
        question_id: u16,
        expected: String,
        received: String,
    },
    #[error("choice {index} is not one of the {available} options")]
    UnknownOption {
        question_id: u16,
        index: usize,
        available: usize,
    },
    #[error("please enter a valid number")]
    InvalidNumber { question_id: u16 },
    #[error("please enter a whole number of zero or more (got {value})")]
    NotWholeNumber { question_id: u16, value: f64 },
    #[error("'{field}' is not one of this question's checkboxes")]
    UnknownCheckbox { question_id: u16, field: AnswerField },
}

/// Caller mistakes the user cannot fix by re-answering.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollectorError {
    #[error("question index {index} is outside the questionnaire ({len} questions)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("completed answers cannot be scored: {0}")]
    Incomplete(#[from] RecordError),
}

/// Per-session progress. The caller owns it and hands it back on every step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectorState {
    pub index: usize,
    #[serde(default)]
    pub answers: AnswerSheet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
}

/// Result of trying to move past the current question.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Moved(CollectorState),
    /// Index unchanged; `error` explains why.
    Rejected(CollectorState),
    Completed(AnswerRecord),
}

/// Walks a questionnaire one question at a time, enforcing required answers.
#[derive(Debug, Clone)]
pub struct AnswerCollector {
    questionnaire: Questionnaire,
}

impl AnswerCollector {
    pub fn new(questionnaire: Questionnaire) -> Self {
        Self { questionnaire }
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn start(&self) -> CollectorState {
        CollectorState::default()
    }

    pub fn current_question(&self, state: &CollectorState) -> Result<&Question, CollectorError> {
        self.questionnaire
            .get(state.index)
            .ok_or(CollectorError::IndexOutOfRange {
                index: state.index,
                len: self.questionnaire.len(),
            })
    }

    /// Records `input` for the current question without moving. An input that does not
    /// fit the question leaves the answers untouched and sets `state.error`.
    pub fn answer(
        &self,
        mut state: CollectorState,
        input: AnswerInput,
    ) -> Result<CollectorState, CollectorError> {
        let question = self.current_question(&state)?;

        match resolve_input(question, input) {
            Ok(writes) => {
                for (field, value) in writes {
                    state.answers.set(field, value);
                }
                state.error = None;
            }
            Err(error) => {
                debug!(question_id = question.id, %error, "answer rejected");
                state.error = Some(error);
            }
        }

        Ok(state)
    }

    /// Applies `input` if given, then moves forward when the current question is
    /// satisfied. Past the last question the answers become an [`AnswerRecord`].
    pub fn advance(
        &self,
        state: CollectorState,
        input: Option<AnswerInput>,
    ) -> Result<Advance, CollectorError> {
        let mut state = match input {
            Some(input) => {
                let state = self.answer(state, input)?;
                if state.error.is_some() {
                    return Ok(Advance::Rejected(state));
                }
                state
            }
            None => state,
        };

        let question = self.current_question(&state)?;
        if question.required && !question.is_answered(&state.answers) {
            let error = ValidationError::MissingAnswer {
                question_id: question.id,
            };
            debug!(question_id = question.id, "required question left blank");
            state.error = Some(error);
            return Ok(Advance::Rejected(state));
        }

        if let QuestionKind::MultiCheckbox { boxes } = &question.kind {
            for checkbox in boxes {
                if !state.answers.contains(checkbox.field) {
                    state.answers.set(checkbox.field, AnswerValue::Flag(false));
                }
            }
        }

        state.error = None;
        if state.index + 1 < self.questionnaire.len() {
            state.index += 1;
            return Ok(Advance::Moved(state));
        }

        let record = AnswerRecord::try_from(&state.answers)?;
        info!(
            questions = self.questionnaire.len(),
            answers = state.answers.len(),
            "questionnaire completed"
        );
        Ok(Advance::Completed(record))
    }

    /// Steps back one question, keeping every answer. A no-op on the first question.
    pub fn back(&self, mut state: CollectorState) -> CollectorState {
        if state.index > 0 {
            state.index -= 1;
            state.error = None;
        }
        state
    }
}

impl Default for AnswerCollector {
    fn default() -> Self {
        Self::new(Questionnaire::standard())
    }
}

fn resolve_input(
    question: &Question,
    input: AnswerInput,
) -> Result<Vec<(AnswerField, AnswerValue)>, ValidationError> {
    let question_id = question.id;

    match (&question.kind, input) {
        (QuestionKind::SingleChoice { field, options }, AnswerInput::Choice(index)) => {
            let option = options.get(index).ok_or(ValidationError::UnknownOption {
                question_id,
                index,
                available: options.len(),
            })?;
            Ok(vec![(*field, option.value)])
        }
        (QuestionKind::Numeric { field, integer, .. }, AnswerInput::Number(value)) => {
            if !value.is_finite() {
                return Err(ValidationError::InvalidNumber { question_id });
            }
            if *integer && whole_number(value).is_none() {
                return Err(ValidationError::NotWholeNumber { question_id, value });
            }
            Ok(vec![(*field, AnswerValue::Number(value))])
        }
        (QuestionKind::MultiCheckbox { boxes }, AnswerInput::Checkboxes(ticks)) => {
            if let Some(field) = ticks
                .keys()
                .find(|field| !boxes.iter().any(|checkbox| checkbox.field == **field))
            {
                return Err(ValidationError::UnknownCheckbox {
                    question_id,
                    field: *field,
                });
            }
            Ok(ticks
                .into_iter()
                .map(|(field, checked)| (field, AnswerValue::Flag(checked)))
                .collect())
        }
        (kind, input) => Err(ValidationError::WrongInput {
            question_id,
            expected: kind.label().to_string(),
            received: input.label().to_string(),
        }),
    }
}
