//! Questionnaire definition, answer collection and WHO-criteria risk scoring.

pub mod batch;
pub mod collector;
pub mod domain;
pub mod questionnaire;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{score_csv, BatchError, BatchSummary};
pub use collector::{
    Advance, AnswerCollector, AnswerInput, CollectorError, CollectorState, ValidationError,
};
pub use domain::{AnswerField, AnswerRecord, AnswerSheet, AnswerValue, FieldKind, RecordError};
pub use questionnaire::{
    Checkbox, ChoiceOption, Question, QuestionKind, Questionnaire, QuestionnaireError,
};
pub use report::{AssessmentReport, DISCLAIMER};
pub use router::triage_router;
pub use scoring::{
    RiskAssessment, RiskLevel, RiskScorer, ScoreComponent, ScoringRubric, ScoringRule, MAX_SCORE,
};
pub use service::{SessionStep, TriageService};
