use std::collections::BTreeMap;
use std::sync::Arc;

use crate::triage::collector::{AnswerCollector, AnswerInput};
use crate::triage::domain::{AnswerField, AnswerRecord};
use crate::triage::scoring::RiskScorer;
use crate::triage::service::TriageService;

/// Adult with a normal temperature, no danger signs and no positive test.
pub(super) fn calm_record() -> AnswerRecord {
    AnswerRecord {
        age: 30,
        has_fever: false,
        temperature: 37.0,
        trouble_consciousness: false,
        convulsions: false,
        severe_anemia: false,
        respiratory_distress: false,
        jaundice: false,
        hemoglobinuria: false,
        has_parasitemia: false,
        parasitemia_level: None,
    }
}

/// Every danger sign and a heavy parasite load.
pub(super) fn gravest_record() -> AnswerRecord {
    AnswerRecord {
        age: 2,
        has_fever: true,
        temperature: 41.0,
        trouble_consciousness: true,
        convulsions: true,
        severe_anemia: true,
        respiratory_distress: true,
        jaundice: true,
        hemoglobinuria: true,
        has_parasitemia: true,
        parasitemia_level: Some(12.0),
    }
}

pub(super) fn scorer() -> RiskScorer {
    RiskScorer::standard()
}

pub(super) fn collector() -> AnswerCollector {
    AnswerCollector::default()
}

pub(super) fn service() -> Arc<TriageService> {
    Arc::new(TriageService::default())
}

pub(super) const YES: AnswerInput = AnswerInput::Choice(0);
pub(super) const NO: AnswerInput = AnswerInput::Choice(1);

pub(super) fn ticked(fields: &[AnswerField]) -> AnswerInput {
    AnswerInput::Checkboxes(
        fields
            .iter()
            .map(|field| (*field, true))
            .collect::<BTreeMap<_, _>>(),
    )
}

/// Inputs walking the standard questionnaire, one per question.
pub(super) fn standard_inputs(
    age: f64,
    fever: bool,
    temperature: f64,
    signs: &[AnswerField],
    parasitemia: Option<f64>,
) -> Vec<Option<AnswerInput>> {
    vec![
        Some(AnswerInput::Number(age)),
        Some(if fever { YES } else { NO }),
        Some(AnswerInput::Number(temperature)),
        Some(ticked(signs)),
        Some(if parasitemia.is_some() { YES } else { NO }),
        parasitemia.map(AnswerInput::Number),
    ]
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
