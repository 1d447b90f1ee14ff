//! Severe malaria orientation kiosk: a fixed questionnaire, an answer collector that
//! walks it one question at a time, and a point-based scorer that maps the completed
//! answers to a WHO-criteria risk tier.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod triage;
