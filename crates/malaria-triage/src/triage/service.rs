use super::collector::{Advance, AnswerCollector, AnswerInput, CollectorError, CollectorState};
use super::domain::AnswerRecord;
use super::questionnaire::Questionnaire;
use super::report::AssessmentReport;
use super::scoring::RiskScorer;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

/// Outcome of one step of a questionnaire session.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum SessionStep {
    InProgress(CollectorState),
    Rejected(CollectorState),
    Completed(Box<AssessmentReport>),
}

/// Service composing the answer collector and the scorer: the collector produces a
/// record, the scorer turns it into a report.
#[derive(Debug, Clone, Default)]
pub struct TriageService {
    collector: AnswerCollector,
    scorer: RiskScorer,
}

impl TriageService {
    pub fn new(questionnaire: Questionnaire, scorer: RiskScorer) -> Self {
        Self {
            collector: AnswerCollector::new(questionnaire),
            scorer,
        }
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        self.collector.questionnaire()
    }

    pub fn collector(&self) -> &AnswerCollector {
        &self.collector
    }

    pub fn start(&self) -> CollectorState {
        self.collector.start()
    }

    pub fn advance(
        &self,
        state: CollectorState,
        input: Option<AnswerInput>,
    ) -> Result<SessionStep, CollectorError> {
        let step = match self.collector.advance(state, input)? {
            Advance::Moved(state) => SessionStep::InProgress(state),
            Advance::Rejected(state) => SessionStep::Rejected(state),
            Advance::Completed(record) => SessionStep::Completed(Box::new(self.assess(record))),
        };
        Ok(step)
    }

    pub fn back(&self, state: CollectorState) -> CollectorState {
        self.collector.back(state)
    }

    pub fn assess(&self, answers: AnswerRecord) -> AssessmentReport {
        let assessment = self.scorer.score(&answers);
        info!(
            score = assessment.score,
            risk = assessment.risk_label,
            severe_criteria = assessment.severe_criteria_count,
            "assessment completed"
        );
        AssessmentReport::new(answers, assessment, Utc::now())
    }
}
