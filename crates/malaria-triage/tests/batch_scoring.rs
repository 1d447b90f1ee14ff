use std::fs::File;
use std::path::PathBuf;

use malaria_triage::triage::{score_csv, RiskLevel, RiskScorer};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn scores_exported_answers() {
    let input = File::open(fixture("answers.csv")).expect("fixture present");
    let mut output = Vec::new();

    let summary = score_csv(input, &mut output, &RiskScorer::standard()).expect("batch runs");

    assert_eq!(summary.scored, 5);
    assert_eq!(summary.count(RiskLevel::Low), 1);
    assert_eq!(summary.count(RiskLevel::Moderate), 1);
    assert_eq!(summary.count(RiskLevel::High), 2);
    assert_eq!(summary.count(RiskLevel::VeryHigh), 1);

    let mut reader = csv::Reader::from_reader(output.as_slice());
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("output parses");
    assert_eq!(rows.len(), 5);
    assert_eq!(&rows[1][1], "45");
    assert_eq!(&rows[1][2], "MODERATE");
    assert_eq!(&rows[1][4], "Altered consciousness; Convulsions");
    assert_eq!(&rows[4][1], "100");
    assert_eq!(&rows[4][2], "VERY HIGH");
}

#[test]
fn empty_export_scores_nothing() {
    let input = "age,hasFever,temperature,troubleConsciousness,convulsions,severeAnemia,respiratoryDistress,jaundice,hemoglobinuria,hasParasitemia,parasitemiaLevel\n";
    let mut output = Vec::new();

    let summary =
        score_csv(input.as_bytes(), &mut output, &RiskScorer::standard()).expect("batch runs");

    assert_eq!(summary.scored, 0);
    assert_eq!(
        String::from_utf8(output).expect("utf8"),
        ""
    );
}
