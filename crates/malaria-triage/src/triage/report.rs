use super::domain::AnswerRecord;
use super::scoring::RiskAssessment;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DISCLAIMER: &str = "This result is indicative and does not replace a full medical diagnosis. When in doubt, always consult a health professional.";

/// Everything a display surface needs to show the outcome of a session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub assessed_at: DateTime<Utc>,
    pub answers: AnswerRecord,
    pub assessment: RiskAssessment,
    pub disclaimer: &'static str,
}

impl AssessmentReport {
    pub fn new(answers: AnswerRecord, assessment: RiskAssessment, assessed_at: DateTime<Utc>) -> Self {
        Self {
            assessed_at,
            answers,
            assessment,
            disclaimer: DISCLAIMER,
        }
    }

    pub fn has_severity_criteria(&self) -> bool {
        !self.assessment.criteria.is_empty()
    }
}
