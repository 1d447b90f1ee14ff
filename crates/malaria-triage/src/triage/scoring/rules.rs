use super::super::domain::AnswerRecord;
use super::rubric::ScoringRubric;
use super::{ScoreComponent, ScoringRule};

/// Runs every rule in its fixed order and returns the contributions that fired
/// alongside their unclamped total.
pub(crate) fn score_record(
    record: &AnswerRecord,
    rubric: &ScoringRubric,
) -> (Vec<ScoreComponent>, u16) {
    let mut components = Vec::new();

    if record.age < rubric.child_age_below {
        components.push(ScoreComponent::severe(
            ScoringRule::ChildUnderFive,
            rubric.child_points,
            format!("Child under {} years old", rubric.child_age_below),
        ));
    } else if record.age > rubric.elderly_age_above {
        components.push(ScoreComponent::minor(
            ScoringRule::Elderly,
            rubric.elderly_points,
        ));
    }

    if record.has_fever {
        components.push(ScoreComponent::minor(ScoringRule::Fever, rubric.fever_points));
    }

    if record.temperature >= rubric.high_fever_celsius {
        components.push(ScoreComponent::severe(
            ScoringRule::HighFever,
            rubric.high_fever_points,
            format!("High fever (≥{}°C)", rubric.high_fever_celsius),
        ));
    } else if record.temperature >= rubric.raised_temperature_celsius {
        components.push(ScoreComponent::minor(
            ScoringRule::RaisedTemperature,
            rubric.raised_temperature_points,
        ));
    }

    let danger_signs = [
        (
            record.trouble_consciousness,
            ScoringRule::AlteredConsciousness,
            rubric.altered_consciousness_points,
        ),
        (
            record.convulsions,
            ScoringRule::Convulsions,
            rubric.convulsions_points,
        ),
        (
            record.severe_anemia,
            ScoringRule::SevereAnemia,
            rubric.severe_anemia_points,
        ),
        (
            record.respiratory_distress,
            ScoringRule::RespiratoryDistress,
            rubric.respiratory_distress_points,
        ),
        (record.jaundice, ScoringRule::Jaundice, rubric.jaundice_points),
        (
            record.hemoglobinuria,
            ScoringRule::Hemoglobinuria,
            rubric.hemoglobinuria_points,
        ),
    ];
    for (present, rule, points) in danger_signs {
        if present {
            components.push(ScoreComponent::severe(rule, points, rule.label().to_string()));
        }
    }

    // A missing level means no smear result, not a level of zero.
    if let (true, Some(level)) = (record.has_parasitemia, record.parasitemia_level) {
        if level >= rubric.high_parasitemia_percent {
            components.push(ScoreComponent::severe(
                ScoringRule::HighParasitemia,
                rubric.high_parasitemia_points,
                format!("High parasitemia ({level}%)"),
            ));
        } else if level >= rubric.raised_parasitemia_percent {
            components.push(ScoreComponent::minor(
                ScoringRule::RaisedParasitemia,
                rubric.raised_parasitemia_points,
            ));
        }
    }

    let total = components
        .iter()
        .map(|component| u16::from(component.points))
        .sum::<u16>();

    (components, total)
}
