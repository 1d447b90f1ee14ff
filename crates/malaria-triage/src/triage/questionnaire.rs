use super::domain::{AnswerField, AnswerSheet, AnswerValue, FieldKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// One selectable answer of a single-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: AnswerValue,
}

/// One box of a checkbox group; ticking it records `true` under `field`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkbox {
    pub label: String,
    pub field: AnswerField,
}

/// How a question is answered, with the data each rendering needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    #[serde(rename = "radio")]
    SingleChoice {
        field: AnswerField,
        options: Vec<ChoiceOption>,
    },
    #[serde(rename = "number")]
    Numeric {
        field: AnswerField,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
        #[serde(default)]
        integer: bool,
    },
    #[serde(rename = "checkbox")]
    MultiCheckbox { boxes: Vec<Checkbox> },
}

impl QuestionKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SingleChoice { .. } => "single choice",
            Self::Numeric { .. } => "numeric",
            Self::MultiCheckbox { .. } => "checkbox group",
        }
    }

    /// Record fields this question writes, in display order.
    pub fn fields(&self) -> Vec<AnswerField> {
        match self {
            Self::SingleChoice { field, .. } | Self::Numeric { field, .. } => vec![*field],
            Self::MultiCheckbox { boxes } => boxes.iter().map(|checkbox| checkbox.field).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u16,
    pub key: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    /// A checkbox group counts as answered once any of its boxes has a value.
    pub fn is_answered(&self, answers: &AnswerSheet) -> bool {
        match &self.kind {
            QuestionKind::SingleChoice { field, .. } | QuestionKind::Numeric { field, .. } => {
                answers.contains(*field)
            }
            QuestionKind::MultiCheckbox { boxes } => boxes
                .iter()
                .any(|checkbox| answers.contains(checkbox.field)),
        }
    }
}

#[derive(Debug, Error)]
pub enum QuestionnaireError {
    #[error("failed to read questionnaire definition: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid questionnaire definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("questionnaire has no questions")]
    Empty,
    #[error("field '{field}' is asked by more than one question (question {question_id})")]
    DuplicateField { field: AnswerField, question_id: u16 },
    #[error("question {question_id} is a {kind} question but field '{field}' holds a {}", .expected.label())]
    KindMismatch {
        question_id: u16,
        field: AnswerField,
        kind: &'static str,
        expected: FieldKind,
    },
    #[error("question {question_id} asks for age but accepts fractional values")]
    FractionalAge { question_id: u16 },
    #[error("question {question_id} offers no options")]
    NoOptions { question_id: u16 },
    #[error("required field '{0}' is never asked by a required question or checkbox")]
    Uncovered(AnswerField),
}

/// Ordered, validated list of questions a session walks through.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

impl Questionnaire {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionnaireError> {
        let questionnaire = Self { questions };
        questionnaire.validate()?;
        Ok(questionnaire)
    }

    /// Built-in six-step definition used by the kiosk.
    pub fn standard() -> Self {
        Self {
            questions: standard_questions(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QuestionnaireError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, QuestionnaireError> {
        let questions: Vec<Question> = serde_json::from_reader(reader)?;
        Self::new(questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Checks that walking every question can always produce a complete record.
    pub fn validate(&self) -> Result<(), QuestionnaireError> {
        if self.questions.is_empty() {
            return Err(QuestionnaireError::Empty);
        }

        let mut seen = BTreeSet::new();
        let mut guaranteed = BTreeSet::new();

        for question in &self.questions {
            for field in question.kind.fields() {
                if !seen.insert(field) {
                    return Err(QuestionnaireError::DuplicateField {
                        field,
                        question_id: question.id,
                    });
                }
            }

            match &question.kind {
                QuestionKind::SingleChoice { field, options } => {
                    if options.is_empty() {
                        return Err(QuestionnaireError::NoOptions {
                            question_id: question.id,
                        });
                    }
                    if options.iter().any(|option| option.value.kind() != field.kind()) {
                        return Err(kind_mismatch(question, *field));
                    }
                    if question.required {
                        guaranteed.insert(*field);
                    }
                }
                QuestionKind::Numeric { field, integer, .. } => {
                    if field.kind() != FieldKind::Number {
                        return Err(kind_mismatch(question, *field));
                    }
                    if *field == AnswerField::Age && !integer {
                        return Err(QuestionnaireError::FractionalAge {
                            question_id: question.id,
                        });
                    }
                    if question.required {
                        guaranteed.insert(*field);
                    }
                }
                QuestionKind::MultiCheckbox { boxes } => {
                    for checkbox in boxes {
                        if checkbox.field.kind() != FieldKind::Flag {
                            return Err(kind_mismatch(question, checkbox.field));
                        }
                        guaranteed.insert(checkbox.field);
                    }
                }
            }
        }

        match AnswerField::ordered()
            .into_iter()
            .find(|field| !field.is_optional() && !guaranteed.contains(field))
        {
            Some(field) => Err(QuestionnaireError::Uncovered(field)),
            None => Ok(()),
        }
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::standard()
    }
}

fn kind_mismatch(question: &Question, field: AnswerField) -> QuestionnaireError {
    QuestionnaireError::KindMismatch {
        question_id: question.id,
        field,
        kind: question.kind.label(),
        expected: field.kind(),
    }
}

fn yes_no() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption {
            label: "Yes".to_string(),
            value: AnswerValue::Flag(true),
        },
        ChoiceOption {
            label: "No".to_string(),
            value: AnswerValue::Flag(false),
        },
    ]
}

fn checkbox(label: &str, field: AnswerField) -> Checkbox {
    Checkbox {
        label: label.to_string(),
        field,
    }
}

fn standard_questions() -> Vec<Question> {
    vec![
        Question {
            id: 1,
            key: "age".to_string(),
            prompt: "How old is the patient?".to_string(),
            icon: Some("👤".to_string()),
            help_text: Some("Age in completed years. Children under 5 are at higher risk.".to_string()),
            required: true,
            kind: QuestionKind::Numeric {
                field: AnswerField::Age,
                unit: Some("years".to_string()),
                integer: true,
            },
        },
        Question {
            id: 2,
            key: "hasFever".to_string(),
            prompt: "Does the patient have a fever or a history of fever in the last 48 hours?".to_string(),
            icon: Some("🌡️".to_string()),
            help_text: None,
            required: true,
            kind: QuestionKind::SingleChoice {
                field: AnswerField::HasFever,
                options: yes_no(),
            },
        },
        Question {
            id: 3,
            key: "temperature".to_string(),
            prompt: "What is the measured body temperature?".to_string(),
            icon: Some("🔥".to_string()),
            help_text: Some("Axillary or oral reading in degrees Celsius.".to_string()),
            required: true,
            kind: QuestionKind::Numeric {
                field: AnswerField::Temperature,
                unit: Some("°C".to_string()),
                integer: false,
            },
        },
        Question {
            id: 4,
            key: "severitySigns".to_string(),
            prompt: "Does the patient show any of these danger signs?".to_string(),
            icon: Some("⚠️".to_string()),
            help_text: Some("Tick every sign observed. Leave all unticked if none apply.".to_string()),
            required: false,
            kind: QuestionKind::MultiCheckbox {
                boxes: vec![
                    checkbox("Altered consciousness or coma", AnswerField::TroubleConsciousness),
                    checkbox("Convulsions", AnswerField::Convulsions),
                    checkbox("Severe anemia (marked pallor)", AnswerField::SevereAnemia),
                    checkbox("Respiratory distress", AnswerField::RespiratoryDistress),
                    checkbox("Jaundice (yellow eyes or skin)", AnswerField::Jaundice),
                    checkbox("Dark or cola-coloured urine", AnswerField::Hemoglobinuria),
                ],
            },
        },
        Question {
            id: 5,
            key: "hasParasitemia".to_string(),
            prompt: "Was a positive malaria test (RDT or blood smear) obtained?".to_string(),
            icon: Some("🔬".to_string()),
            help_text: Some("Answer No if no test was performed.".to_string()),
            required: true,
            kind: QuestionKind::SingleChoice {
                field: AnswerField::HasParasitemia,
                options: yes_no(),
            },
        },
        Question {
            id: 6,
            key: "parasitemiaLevel".to_string(),
            prompt: "What parasitemia level did the blood smear report?".to_string(),
            icon: Some("🩸".to_string()),
            help_text: Some("Percentage of infected red blood cells. Leave blank if unknown.".to_string()),
            required: false,
            kind: QuestionKind::Numeric {
                field: AnswerField::ParasitemiaLevel,
                unit: Some("%".to_string()),
                integer: false,
            },
        },
    ]
}
