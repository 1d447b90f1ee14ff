use malaria_triage::error::AppError;
use malaria_triage::triage::{
    AnswerField, AnswerInput, AssessmentReport, Question, QuestionKind, SessionStep,
    TriageService,
};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

const BACK_COMMAND: &str = "back";

/// Walks the questionnaire over a line-oriented terminal. Returns `None` when the input
/// ends before the last question is answered.
pub(crate) fn run_session<R, W>(
    service: &TriageService,
    mut input: R,
    mut output: W,
) -> Result<Option<AssessmentReport>, AppError>
where
    R: BufRead,
    W: Write,
{
    let total = service.questionnaire().len();
    let mut state = service.start();

    loop {
        let question = service.collector().current_question(&state)?;
        if let Some(error) = &state.error {
            writeln!(output, "! {error}")?;
        }
        write_prompt(&mut output, question, state.index, total)?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();

        if line.eq_ignore_ascii_case(BACK_COMMAND) {
            state = service.back(state);
            continue;
        }

        let reply = match parse_reply(question, line) {
            Ok(reply) => reply,
            Err(message) => {
                writeln!(output, "! {message}")?;
                continue;
            }
        };

        state = match service.advance(state, reply)? {
            SessionStep::InProgress(next) | SessionStep::Rejected(next) => next,
            SessionStep::Completed(report) => return Ok(Some(*report)),
        };
    }
}

fn write_prompt<W: Write>(
    output: &mut W,
    question: &Question,
    index: usize,
    total: usize,
) -> std::io::Result<()> {
    writeln!(output)?;
    writeln!(output, "[{}/{}] {}", index + 1, total, question.prompt)?;
    if let Some(help) = &question.help_text {
        writeln!(output, "    {help}")?;
    }

    match &question.kind {
        QuestionKind::SingleChoice { options, .. } => {
            for (position, option) in options.iter().enumerate() {
                writeln!(output, "  {}) {}", position + 1, option.label)?;
            }
            write!(output, "Choose an option")?;
        }
        QuestionKind::Numeric { unit, .. } => match unit {
            Some(unit) => write!(output, "Enter a value in {unit}")?,
            None => write!(output, "Enter a value")?,
        },
        QuestionKind::MultiCheckbox { boxes } => {
            for (position, checkbox) in boxes.iter().enumerate() {
                writeln!(output, "  {}) {}", position + 1, checkbox.label)?;
            }
            write!(output, "List every number that applies, separated by commas")?;
        }
    }

    let hint = if question.required { "" } else { ", blank to skip" };
    write!(output, " ('{BACK_COMMAND}' to go back{hint}): ")?;
    output.flush()
}

/// Turns a typed line into collector input. A blank line submits nothing.
fn parse_reply(question: &Question, line: &str) -> Result<Option<AnswerInput>, String> {
    if line.is_empty() {
        return Ok(None);
    }

    match &question.kind {
        QuestionKind::SingleChoice { options, .. } => {
            let position = line
                .parse::<usize>()
                .ok()
                .filter(|position| (1..=options.len()).contains(position))
                .ok_or_else(|| format!("please type a number between 1 and {}", options.len()))?;
            Ok(Some(AnswerInput::Choice(position - 1)))
        }
        QuestionKind::Numeric { .. } => line
            .replace(',', ".")
            .parse::<f64>()
            .map(|value| Some(AnswerInput::Number(value)))
            .map_err(|_| "please enter a valid number".to_string()),
        QuestionKind::MultiCheckbox { boxes } => {
            let mut ticked: BTreeMap<AnswerField, bool> = BTreeMap::new();
            for token in line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
            {
                let checkbox = token
                    .parse::<usize>()
                    .ok()
                    .and_then(|position| position.checked_sub(1))
                    .and_then(|index| boxes.get(index))
                    .ok_or_else(|| format!("'{token}' is not one of the listed signs"))?;
                ticked.insert(checkbox.field, true);
            }
            Ok(Some(AnswerInput::Checkboxes(ticked)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use malaria_triage::triage::RiskLevel;
    use std::io::Cursor;

    fn session(script: &str) -> (Option<AssessmentReport>, String) {
        let service = TriageService::default();
        let mut transcript = Vec::new();
        let report = run_session(&service, Cursor::new(script.to_string()), &mut transcript)
            .expect("session runs");
        (
            report,
            String::from_utf8(transcript).expect("utf8 transcript"),
        )
    }

    #[test]
    fn scripted_session_produces_report() {
        let (report, transcript) = session("3\n1\n40\n\n2\n\n");

        let report = report.expect("session completes");
        assert_eq!(report.assessment.score, 50);
        assert_eq!(report.assessment.risk_level, RiskLevel::High);
        assert!(transcript.contains("[1/6] How old is the patient?"));
        assert!(transcript.contains("  1) Yes"));
    }

    #[test]
    fn blank_required_answer_is_reprompted() {
        let (report, transcript) = session("\n30\n2\n37\n\n2\n\n");

        assert!(report.is_some());
        assert!(transcript.contains("! please answer this question to continue"));
    }

    #[test]
    fn unreadable_replies_are_reprompted_without_losing_progress() {
        let (report, transcript) = session("30\nmaybe\n2\nwarm\n37,5\n9\n1 3\n2\n\n");

        let report = report.expect("session completes");
        assert!(transcript.contains("! please type a number between 1 and 2"));
        assert!(transcript.contains("! please enter a valid number"));
        assert!(transcript.contains("! '9' is not one of the listed signs"));
        assert_eq!(report.answers.temperature, 37.5);
        assert!(report.answers.trouble_consciousness);
        assert!(report.answers.severe_anemia);
        assert!(!report.answers.convulsions);
    }

    #[test]
    fn back_revisits_previous_question() {
        let (report, transcript) = session("30\nback\n4\n2\n37\n\n2\n\n");

        let report = report.expect("session completes");
        assert_eq!(report.answers.age, 4);
        assert_eq!(transcript.matches("How old is the patient?").count(), 2);
    }

    #[test]
    fn end_of_input_abandons_session() {
        let (report, _) = session("30\n1\n");
        assert!(report.is_none());
    }
}
