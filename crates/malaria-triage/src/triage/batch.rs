use super::domain::AnswerRecord;
use super::scoring::{RiskLevel, RiskScorer};
use serde::Serialize;
use std::io::{Read, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("invalid answers on row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("failed to write assessments: {0}")]
    Write(#[from] csv::Error),
    #[error("failed to flush assessments: {0}")]
    Io(#[from] std::io::Error),
}

/// One output line per scored record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssessmentRow {
    row: usize,
    score: u8,
    risk_level: &'static str,
    severe_criteria_count: usize,
    criteria: String,
}

/// Tally of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub scored: usize,
    per_level: [usize; 4],
}

impl BatchSummary {
    pub fn count(&self, level: RiskLevel) -> usize {
        self.per_level[level as usize]
    }
}

/// Scores every answer record in a CSV export (camelCase headers, blank
/// `parasitemiaLevel` for "not measured") and writes one assessment row per record.
pub fn score_csv<R: Read, W: Write>(
    reader: R,
    writer: W,
    scorer: &RiskScorer,
) -> Result<BatchSummary, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut summary = BatchSummary::default();

    for (offset, record) in csv_reader.deserialize::<AnswerRecord>().enumerate() {
        let row = offset + 1;
        let answers = record.map_err(|source| BatchError::Row { row, source })?;
        let assessment = scorer.score(&answers);

        csv_writer.serialize(AssessmentRow {
            row,
            score: assessment.score,
            risk_level: assessment.risk_label,
            severe_criteria_count: assessment.severe_criteria_count,
            criteria: assessment.criteria.join("; "),
        })?;

        summary.scored += 1;
        summary.per_level[assessment.risk_level as usize] += 1;
    }

    csv_writer.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "age,hasFever,temperature,troubleConsciousness,convulsions,severeAnemia,respiratoryDistress,jaundice,hemoglobinuria,hasParasitemia,parasitemiaLevel\n";

    #[test]
    fn scores_each_row_and_tallies_levels() {
        let input = format!(
            "{HEADER}3,true,40,false,false,false,false,false,false,false,\n\
             30,false,37,false,false,false,false,false,false,false,\n\
             70,true,36,false,false,false,false,false,false,true,6\n"
        );
        let mut output = Vec::new();

        let summary =
            score_csv(Cursor::new(input), &mut output, &RiskScorer::standard()).expect("batch runs");

        assert_eq!(summary.scored, 3);
        assert_eq!(summary.count(RiskLevel::High), 2);
        assert_eq!(summary.count(RiskLevel::Low), 1);
        assert_eq!(summary.count(RiskLevel::VeryHigh), 0);

        let written = String::from_utf8(output).expect("utf8 output");
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "row,score,riskLevel,severeCriteriaCount,criteria");
        assert_eq!(
            lines[1],
            "1,50,HIGH,2,Child under 5 years old; High fever (≥39.5°C)"
        );
        assert_eq!(lines[2], "2,0,LOW,0,");
        assert_eq!(lines[3], "3,50,HIGH,1,High parasitemia (6%)");
    }

    #[test]
    fn reports_offending_row() {
        let input = format!(
            "{HEADER}30,false,37,false,false,false,false,false,false,false,\n\
             abc,false,37,false,false,false,false,false,false,false,\n"
        );

        let err = score_csv(Cursor::new(input), Vec::new(), &RiskScorer::standard())
            .expect_err("non-numeric age is rejected");
        match err {
            BatchError::Row { row, .. } => assert_eq!(row, 2),
            other => panic!("expected row error, got {other:?}"),
        }
    }
}
