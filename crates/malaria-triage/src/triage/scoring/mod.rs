mod rubric;
mod rules;
mod tiers;

pub use rubric::ScoringRubric;
pub use tiers::RiskLevel;

use super::domain::AnswerRecord;
use serde::{Deserialize, Serialize};

/// Scores never exceed this ceiling, however many rules fire.
pub const MAX_SCORE: u8 = 100;

/// Rule that contributed points to an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    ChildUnderFive,
    Elderly,
    Fever,
    HighFever,
    RaisedTemperature,
    AlteredConsciousness,
    Convulsions,
    SevereAnemia,
    RespiratoryDistress,
    Jaundice,
    Hemoglobinuria,
    HighParasitemia,
    RaisedParasitemia,
}

impl ScoringRule {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ChildUnderFive => "Child under 5",
            Self::Elderly => "Elderly patient",
            Self::Fever => "Fever",
            Self::HighFever => "High fever",
            Self::RaisedTemperature => "Raised temperature",
            Self::AlteredConsciousness => "Altered consciousness",
            Self::Convulsions => "Convulsions",
            Self::SevereAnemia => "Severe anemia",
            Self::RespiratoryDistress => "Respiratory distress",
            Self::Jaundice => "Jaundice",
            Self::Hemoglobinuria => "Hemoglobinuria",
            Self::HighParasitemia => "High parasitemia",
            Self::RaisedParasitemia => "Raised parasitemia",
        }
    }
}

/// Discrete contribution to a score, kept for audit. `criterion` is set only for
/// rules that count as a severity criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub rule: ScoringRule,
    pub points: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criterion: Option<String>,
}

impl ScoreComponent {
    fn severe(rule: ScoringRule, points: u8, criterion: String) -> Self {
        Self {
            rule,
            points,
            criterion: Some(criterion),
        }
    }

    fn minor(rule: ScoringRule, points: u8) -> Self {
        Self {
            rule,
            points,
            criterion: None,
        }
    }
}

/// Scored outcome of one completed questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub score: u8,
    pub risk_level: RiskLevel,
    pub risk_label: &'static str,
    pub risk_color: &'static str,
    pub recommendation: &'static str,
    /// Triggered severity criteria in rule evaluation order.
    pub criteria: Vec<String>,
    pub severe_criteria_count: usize,
    pub components: Vec<ScoreComponent>,
}

/// Stateless scorer applying a rubric to completed answers.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    rubric: ScoringRubric,
}

impl RiskScorer {
    pub fn new(rubric: ScoringRubric) -> Self {
        Self { rubric }
    }

    pub fn standard() -> Self {
        Self::new(ScoringRubric::standard())
    }

    pub fn rubric(&self) -> &ScoringRubric {
        &self.rubric
    }

    pub fn score(&self, record: &AnswerRecord) -> RiskAssessment {
        let (components, total) = rules::score_record(record, &self.rubric);
        let score = total.min(u16::from(MAX_SCORE)) as u8;
        let risk_level = RiskLevel::from_score(score);

        let criteria: Vec<String> = components
            .iter()
            .filter_map(|component| component.criterion.clone())
            .collect();

        RiskAssessment {
            score,
            risk_level,
            risk_label: risk_level.label(),
            risk_color: risk_level.color(),
            recommendation: risk_level.recommendation(),
            severe_criteria_count: criteria.len(),
            criteria,
            components,
        }
    }
}
