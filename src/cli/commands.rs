//! Command dispatch
//!
//! Every action catches its own errors at this boundary: they are logged,
//! shown to the user, and mapped to an exit code by `main`.

use std::io::{self, BufRead};

use clap::CommandFactory;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::application::services::ReviewSession;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Overrides, Settings};
use crate::domain::{ClassificationResult, LoadReport, UiState};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Run the parsed command line.
pub fn execute_command(cli: Cli) -> CliResult<()> {
    let overrides = Overrides {
        endpoint: cli.endpoint,
        token: cli.token,
        timeout_secs: cli.timeout,
    };

    let Some(command) = cli.command else {
        return Err(CliError::Usage(
            "no command given; run `revsent --help`".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "revsent", &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load()?.with_overrides(&overrides);
    debug!("endpoint: {}", settings.endpoint);

    match command {
        Commands::Config { command } => config_command(command, &settings),
        Commands::Load { dataset } => {
            let container = ServiceContainer::new(settings);
            load(&container, &dataset)
        }
        Commands::Pick { dataset } => {
            let dataset = resolve_dataset(dataset, &settings)?;
            let container = ServiceContainer::new(settings);
            pick(&container, &dataset)
        }
        Commands::Analyze { dataset, json } => {
            let dataset = resolve_dataset(dataset, &settings)?;
            let container = ServiceContainer::new(settings);
            analyze(&container, &dataset, json)
        }
        Commands::Classify { text, json } => {
            let container = ServiceContainer::new(settings);
            classify(&container, &text, json)
        }
        Commands::Session { dataset } => {
            let dataset = dataset.or_else(|| settings.dataset.clone());
            let container = ServiceContainer::new(settings);
            let mut session = observed_session(&container);
            let stdin = io::stdin();
            run_session(&mut session, dataset.as_deref(), stdin.lock())
        }
        Commands::Completion { .. } => Ok(()),
    }
}

/// Dataset from the argument, else from settings.
pub fn resolve_dataset(arg: Option<String>, settings: &Settings) -> CliResult<String> {
    arg.or_else(|| settings.dataset.clone()).ok_or_else(|| {
        CliError::Usage(
            "no dataset given; pass one or set `dataset` in the config (REVSENT_DATASET)"
                .to_string(),
        )
    })
}

/// Session that shows the loading state before each blocking call.
pub fn observed_session(container: &ServiceContainer) -> ReviewSession {
    let mut session = container.session();
    session.set_observer(|state| {
        if state == UiState::Loading {
            output::state(state.presentation());
        }
    });
    session
}

fn report(err: &ApplicationError) {
    warn!("action failed: {}", err);
    output::error(err);
}

fn print_report(location: &str, report: &LoadReport) {
    output::success(&format!("loaded {} reviews from {}", report.kept, location));
    output::detail(&format!("rows: {}", report.rows));
    if report.blank > 0 {
        output::detail(&format!("blank text dropped: {}", report.blank));
    }
    if report.malformed > 0 {
        output::warning(&format!(
            "{} malformed rows (unexpected field count)",
            report.malformed
        ));
    }
}

#[instrument(skip(container))]
fn load(container: &ServiceContainer, dataset: &str) -> CliResult<()> {
    output::state(UiState::Loading.presentation());
    let loaded = container.corpus_service().load(dataset).map_err(ApplicationError::from)?;
    print_report(&loaded.location, &loaded.report);
    Ok(())
}

#[instrument(skip(container))]
fn pick(container: &ServiceContainer, dataset: &str) -> CliResult<()> {
    let mut session = observed_session(container);
    session.load(dataset)?;
    let review = session.pick().ok_or(ApplicationError::NoReviewLoaded)?;
    output::info(review);
    Ok(())
}

#[derive(Serialize)]
struct AnalysisOutput<'a> {
    review: &'a str,
    #[serde(flatten)]
    result: &'a ClassificationResult,
}

fn render(session: &ReviewSession, json: bool) -> CliResult<()> {
    let Some(review) = session.current_review() else {
        return Ok(());
    };
    match (json, session.last_result()) {
        (true, Some(result)) => {
            let out = serde_json::to_string_pretty(&AnalysisOutput { review, result })
                .map_err(|e| InfraError::io("serialize result", io::Error::other(e)))?;
            output::info(&out);
        }
        (true, None) => {}
        (false, result) => output::review(review, session.presentation(), result),
    }
    Ok(())
}

#[instrument(skip(container))]
fn analyze(container: &ServiceContainer, dataset: &str, json: bool) -> CliResult<()> {
    let mut session = observed_session(container);
    session.load(dataset)?;
    let outcome = session.pick_and_analyze();
    render(&session, json)?;
    outcome?;
    Ok(())
}

#[instrument(skip(container, text))]
fn classify(container: &ServiceContainer, text: &str, json: bool) -> CliResult<()> {
    let mut session = observed_session(container);
    session.set_current_review(text);
    let outcome = session.analyze_current();
    render(&session, json)?;
    outcome?;
    Ok(())
}

fn config_command(command: ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::warning("no config directory available on this platform"),
            }
            Ok(())
        }
        ConfigCommands::Init => {
            let path = global_config_path().ok_or_else(|| ApplicationError::Config {
                message: "no config directory available on this platform".to_string(),
            })?;
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}

/// One line of input in an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Next,
    Again,
    Load(String),
    Show,
    Status,
    Help,
    Quit,
    Unknown(String),
}

/// Parse a session line. An empty line means `next`.
pub fn parse_session_command(line: &str) -> SessionCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    match word.to_ascii_lowercase().as_str() {
        "" | "n" | "next" => SessionCommand::Next,
        "a" | "again" => SessionCommand::Again,
        "l" | "load" if !rest.is_empty() => SessionCommand::Load(rest.to_string()),
        "s" | "show" => SessionCommand::Show,
        "status" => SessionCommand::Status,
        "h" | "help" | "?" => SessionCommand::Help,
        "q" | "quit" | "exit" => SessionCommand::Quit,
        _ => SessionCommand::Unknown(line.to_string()),
    }
}

const SESSION_HELP: &str = "\
commands:
  next, n, <enter>  pick a random review and classify it
  again, a          classify the current review again
  load <path|url>   load another dataset
  show, s           show the current review and result
  status            show corpus and session details
  help, h           this help
  quit, q           leave";

fn show(session: &ReviewSession) {
    match session.current_review() {
        Some(review) => output::review(review, session.presentation(), session.last_result()),
        None => output::info(&output::status_line(session.presentation(), None)),
    }
    if let Some(err) = session.last_error() {
        output::detail(err);
    }
}

fn status(session: &ReviewSession) {
    output::header("session");
    output::detail(&format!(
        "dataset: {}",
        session.location().unwrap_or("<none>")
    ));
    output::detail(&format!("reviews: {}", session.corpus().len()));
    output::detail(&format!("state: {}", session.state()));
    if let Some(review) = session.current_review() {
        output::detail(&format!("current review: {}", review));
    }
    output::detail(&format!(
        "token: {}",
        if session.has_token() { "set" } else { "not set" }
    ));
    if let Some(result) = session.last_result() {
        output::detail(&format!("last result: {} {:.3}", result.label, result.score));
    }
}

/// Drive a session from line-oriented input until `quit` or end of input.
///
/// Action errors are reported and the loop continues.
pub fn run_session<R: BufRead>(
    session: &mut ReviewSession,
    dataset: Option<&str>,
    input: R,
) -> CliResult<()> {
    if let Some(dataset) = dataset {
        match session.load(dataset) {
            Ok(report) => print_report(dataset, &report),
            Err(e) => report(&e),
        }
    }
    output::info("type `help` for commands");

    let mut lines = input.lines();
    loop {
        output::prompt("revsent>");
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(|e| InfraError::io("read input", e))?;

        match parse_session_command(&line) {
            SessionCommand::Next => {
                if let Err(e) = session.pick_and_analyze() {
                    report(&e);
                }
                show(session);
            }
            SessionCommand::Again => {
                if let Err(e) = session.reanalyze() {
                    report(&e);
                }
                show(session);
            }
            SessionCommand::Load(location) => match session.load(&location) {
                Ok(r) => print_report(&location, &r),
                Err(e) => report(&e),
            },
            SessionCommand::Show => show(session),
            SessionCommand::Status => status(session),
            SessionCommand::Help => output::info(SESSION_HELP),
            SessionCommand::Quit => break,
            SessionCommand::Unknown(input) => {
                output::warning(&format!("unknown command: {input}"));
            }
        }
    }
    Ok(())
}
