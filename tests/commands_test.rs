//! Tests for the interactive session loop driven through the service container

use std::io::{self, Cursor};
use std::sync::Arc;

use revsent::cli::commands::run_session;
use revsent::config::Settings;
use revsent::domain::UiState;
use revsent::infrastructure::di::ServiceContainer;
use revsent::infrastructure::traits::{ClassifierTransport, DatasetSource, HttpReply};
use revsent::util::testing::{self, tsv_dataset};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

struct OneDataset;

impl DatasetSource for OneDataset {
    fn fetch(&self, location: &str) -> io::Result<String> {
        match location {
            "reviews.tsv" => Ok(tsv_dataset(&["Gripping from start to finish"])),
            _ => Err(io::Error::new(io::ErrorKind::NotFound, "missing")),
        }
    }
}

struct AlwaysPositive;

impl ClassifierTransport for AlwaysPositive {
    fn post(&self, _inputs: &str, _token: Option<&str>) -> io::Result<HttpReply> {
        Ok(HttpReply::new(
            200,
            r#"[[{"label":"POSITIVE","score":0.99}]]"#,
        ))
    }
}

fn container() -> ServiceContainer {
    ServiceContainer::with_deps(
        Settings::default(),
        Arc::new(OneDataset),
        Arc::new(AlwaysPositive),
    )
}

#[test]
fn given_script_when_running_session_then_processes_until_quit() {
    let container = container();
    let mut session = container.session();
    let input = Cursor::new("next\nagain\nstatus\nbogus\nquit\nnext\n");

    run_session(&mut session, Some("reviews.tsv"), input).unwrap();

    assert_eq!(
        session.current_review(),
        Some("Gripping from start to finish")
    );
    assert_eq!(session.state(), UiState::Positive);
}

#[test]
fn given_failed_initial_load_when_running_session_then_loop_continues() {
    let container = container();
    let mut session = container.session();
    let input = Cursor::new("next\nload reviews.tsv\nnext\n");

    run_session(&mut session, Some("missing.tsv"), input).unwrap();

    assert_eq!(session.location(), Some("reviews.tsv"));
    assert_eq!(session.state(), UiState::Positive);
}

#[test]
fn given_end_of_input_when_running_session_then_returns_ok() {
    let container = container();
    let mut session = container.session();

    run_session(&mut session, None, Cursor::new("")).unwrap();

    assert_eq!(session.state(), UiState::Idle);
}
