//! Tests for layered settings loading

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;

use revsent::application::ApplicationError;
use revsent::config::{Settings, DEFAULT_ENDPOINT, DEFAULT_MAX_RESPONSE_BYTES};
use revsent::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

/// Load with an empty environment so exported `REVSENT_*` variables do not leak in.
fn load_isolated(path: &Path) -> Result<Settings, ApplicationError> {
    Settings::load_with_env(Some(path), Some(HashMap::new()))
}

#[test]
fn given_no_config_file_when_load_from_then_defaults() {
    let temp = TempDir::new().unwrap();

    let settings = load_isolated(&temp.path().join("absent.toml")).unwrap();

    assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(settings.max_response_bytes, DEFAULT_MAX_RESPONSE_BYTES);
}

#[test]
fn given_config_file_when_load_from_then_file_values_applied() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("revsent.toml");
    std::fs::write(
        &path,
        r#"
endpoint = "http://localhost:9000/predict"
dataset = "https://example.com/reviews.tsv"
timeout_secs = 15
"#,
    )
    .unwrap();

    let settings = load_isolated(&path).unwrap();

    assert_eq!(settings.endpoint, "http://localhost:9000/predict");
    assert_eq!(
        settings.dataset.as_deref(),
        Some("https://example.com/reviews.tsv")
    );
    assert_eq!(settings.timeout(), Some(Duration::from_secs(15)));
}

#[test]
fn given_invalid_toml_when_load_from_then_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("revsent.toml");
    std::fs::write(&path, "timeout_secs = \"soon\"\n").unwrap();

    let err = load_isolated(&path).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }), "{err:?}");
}

#[test]
fn given_template_when_written_and_loaded_then_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("revsent.toml");
    std::fs::write(&path, Settings::template()).unwrap();

    let settings = load_isolated(&path).unwrap();

    assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    assert!(settings.dataset.is_none());
}

#[test]
fn given_env_vars_when_loading_then_override_file_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("revsent.toml");
    std::fs::write(&path, "timeout_secs = 15\nmax_dataset_bytes = 1024\n").unwrap();
    let env = HashMap::from([
        ("REVSENT_TIMEOUT_SECS".to_string(), "3".to_string()),
        (
            "REVSENT_ENDPOINT".to_string(),
            "http://localhost:1/classify".to_string(),
        ),
    ]);

    let settings = Settings::load_with_env(Some(&path), Some(env)).unwrap();

    assert_eq!(settings.timeout(), Some(Duration::from_secs(3)));
    assert_eq!(settings.endpoint, "http://localhost:1/classify");
    assert_eq!(settings.max_dataset_bytes, 1024);
}
