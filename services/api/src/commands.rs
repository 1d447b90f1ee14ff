use crate::infra::{build_service, read_record};
use crate::interactive::run_session;
use chrono::Local;
use clap::Args;
use malaria_triage::config::AppConfig;
use malaria_triage::error::AppError;
use malaria_triage::triage::{score_csv, AssessmentReport, RiskLevel, RiskScorer};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct AskArgs {
    /// JSON questionnaire definition (defaults to APP_QUESTIONNAIRE_PATH, then the built-in one)
    #[arg(long)]
    pub(crate) questionnaire: Option<PathBuf>,
    /// Print the final report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding one completed answer record
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export of answer records with camelCase headers
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Where to write the scored rows (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_ask(args: AskArgs) -> Result<(), AppError> {
    let AskArgs {
        questionnaire,
        json,
    } = args;

    let definition = match questionnaire {
        Some(path) => Some(path),
        None => AppConfig::load()?.questionnaire.definition_path,
    };
    let service = build_service(definition.as_deref())?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Severe malaria orientation questionnaire")?;

    match run_session(&service, stdin.lock(), &mut stdout)? {
        Some(report) => {
            writeln!(stdout)?;
            write_report(&mut stdout, &report, json)
        }
        None => {
            writeln!(stdout)?;
            writeln!(stdout, "Session abandoned before the last question.")?;
            Ok(())
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { input, json } = args;

    let service = build_service(None)?;
    let report = service.assess(read_record(&input)?);

    write_report(&mut io::stdout().lock(), &report, json)
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs { input, output } = args;

    let reader = BufReader::new(File::open(&input)?);
    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    let summary = score_csv(reader, writer, &RiskScorer::standard())?;

    let tally = RiskLevel::ordered()
        .into_iter()
        .map(|level| format!("{} {}", level.label(), summary.count(level)))
        .collect::<Vec<_>>()
        .join(" | ");
    eprintln!("Scored {} records: {tally}", summary.scored);
    if let Some(path) = output {
        eprintln!("Assessments written to {}", path.display());
    }

    Ok(())
}

fn write_report<W: Write>(
    output: &mut W,
    report: &AssessmentReport,
    json: bool,
) -> Result<(), AppError> {
    if json {
        serde_json::to_writer_pretty(&mut *output, report)?;
        writeln!(output)?;
    } else {
        render_report(output, report)?;
    }
    Ok(())
}

pub(crate) fn render_report<W: Write>(output: &mut W, report: &AssessmentReport) -> io::Result<()> {
    let assessment = &report.assessment;

    writeln!(output, "Malaria severity assessment")?;
    writeln!(
        output,
        "- Assessed at {}",
        report
            .assessed_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
    )?;
    writeln!(output, "- Score {}/100", assessment.score)?;
    writeln!(
        output,
        "- Risk level {} ({})",
        assessment.risk_label, assessment.risk_color
    )?;
    writeln!(output, "- {}", assessment.recommendation)?;

    if report.has_severity_criteria() {
        writeln!(
            output,
            "Severity criteria ({}):",
            assessment.severe_criteria_count
        )?;
        for criterion in &assessment.criteria {
            writeln!(output, "  - {criterion}")?;
        }
    } else {
        writeln!(output, "No major severity signs detected.")?;
    }

    writeln!(output)?;
    writeln!(output, "{}", report.disclaimer)
}
