use serde::{Deserialize, Serialize};

/// Point weights and thresholds applied by the scorer. Weights are unsigned, so
/// ticking an extra danger sign can never lower a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRubric {
    pub child_age_below: u32,
    pub child_points: u8,
    pub elderly_age_above: u32,
    pub elderly_points: u8,
    pub fever_points: u8,
    pub high_fever_celsius: f64,
    pub high_fever_points: u8,
    pub raised_temperature_celsius: f64,
    pub raised_temperature_points: u8,
    pub altered_consciousness_points: u8,
    pub convulsions_points: u8,
    pub severe_anemia_points: u8,
    pub respiratory_distress_points: u8,
    pub jaundice_points: u8,
    pub hemoglobinuria_points: u8,
    pub high_parasitemia_percent: f64,
    pub high_parasitemia_points: u8,
    pub raised_parasitemia_percent: f64,
    pub raised_parasitemia_points: u8,
}

impl ScoringRubric {
    /// Weights derived from the WHO severe malaria criteria.
    pub fn standard() -> Self {
        Self {
            child_age_below: 5,
            child_points: 15,
            elderly_age_above: 65,
            elderly_points: 10,
            fever_points: 20,
            high_fever_celsius: 39.5,
            high_fever_points: 15,
            raised_temperature_celsius: 38.0,
            raised_temperature_points: 10,
            altered_consciousness_points: 25,
            convulsions_points: 20,
            severe_anemia_points: 15,
            respiratory_distress_points: 20,
            jaundice_points: 10,
            hemoglobinuria_points: 15,
            high_parasitemia_percent: 5.0,
            high_parasitemia_points: 20,
            raised_parasitemia_percent: 2.0,
            raised_parasitemia_points: 10,
        }
    }
}

impl Default for ScoringRubric {
    fn default() -> Self {
        Self::standard()
    }
}
