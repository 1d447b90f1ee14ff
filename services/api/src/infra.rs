use malaria_triage::error::AppError;
use malaria_triage::triage::{AnswerRecord, Questionnaire, RiskScorer, TriageService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the service from a JSON definition, or the built-in questionnaire when no
/// path is given.
pub(crate) fn build_service(definition: Option<&Path>) -> Result<TriageService, AppError> {
    let questionnaire = match definition {
        Some(path) => {
            let questionnaire = Questionnaire::from_path(path)?;
            info!(
                path = %path.display(),
                questions = questionnaire.len(),
                "loaded questionnaire definition"
            );
            questionnaire
        }
        None => Questionnaire::standard(),
    };

    Ok(TriageService::new(questionnaire, RiskScorer::standard()))
}

pub(crate) fn read_record(path: &Path) -> Result<AnswerRecord, AppError> {
    let file = File::open(path)?;
    let record = serde_json::from_reader(BufReader::new(file))?;
    Ok(record)
}
