use crate::commands::{run_ask, run_batch, run_score, AskArgs, BatchArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use malaria_triage::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Malaria Triage",
    about = "Severe malaria orientation questionnaire and risk scorer",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk the questionnaire interactively in the terminal
    Ask(AskArgs),
    /// Score one completed answer record stored as JSON
    Score(ScoreArgs),
    /// Score every answer record in a CSV export
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Ask(args) => run_ask(args),
        Command::Score(args) => run_score(args),
        Command::Batch(args) => run_batch(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["malaria-triage-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_batch_paths() {
        let cli = Cli::try_parse_from([
            "malaria-triage-api",
            "batch",
            "--input",
            "answers.csv",
            "--output",
            "scored.csv",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Batch(args)) => {
                assert_eq!(args.input.to_str(), Some("answers.csv"));
                assert_eq!(
                    args.output.as_deref().and_then(|path| path.to_str()),
                    Some("scored.csv")
                );
            }
            other => panic!("expected batch command, got {other:?}"),
        }
    }

    #[test]
    fn score_requires_an_input() {
        assert!(Cli::try_parse_from(["malaria-triage-api", "score", "--json"]).is_err());
    }
}
