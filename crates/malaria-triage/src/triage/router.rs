use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::collector::{AnswerInput, CollectorState};
use super::domain::AnswerRecord;
use super::service::TriageService;
use crate::error::AppError;

/// Session state travels with each request; the server keeps none.
#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    pub state: CollectorState,
    #[serde(default)]
    pub input: Option<AnswerInput>,
}

#[derive(Debug, Deserialize)]
pub struct BackRequest {
    pub state: CollectorState,
}

/// Router builder exposing the questionnaire, session stepping and direct scoring.
pub fn triage_router(service: Arc<TriageService>) -> Router {
    Router::new()
        .route("/api/v1/questionnaire", get(questionnaire_handler))
        .route("/api/v1/sessions/start", post(start_handler))
        .route("/api/v1/sessions/advance", post(advance_handler))
        .route("/api/v1/sessions/back", post(back_handler))
        .route("/api/v1/assessments", post(assessment_handler))
        .with_state(service)
}

pub(crate) async fn questionnaire_handler(State(service): State<Arc<TriageService>>) -> Response {
    (StatusCode::OK, Json(service.questionnaire())).into_response()
}

pub(crate) async fn start_handler(State(service): State<Arc<TriageService>>) -> Response {
    (StatusCode::OK, Json(service.start())).into_response()
}

pub(crate) async fn advance_handler(
    State(service): State<Arc<TriageService>>,
    Json(request): Json<AdvanceRequest>,
) -> Response {
    match service.advance(request.state, request.input) {
        Ok(step) => (StatusCode::OK, Json(step)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn back_handler(
    State(service): State<Arc<TriageService>>,
    Json(request): Json<BackRequest>,
) -> Response {
    (StatusCode::OK, Json(service.back(request.state))).into_response()
}

pub(crate) async fn assessment_handler(
    State(service): State<Arc<TriageService>>,
    Json(answers): Json<AnswerRecord>,
) -> Response {
    let report = service.assess(answers);
    (StatusCode::OK, Json(report)).into_response()
}
