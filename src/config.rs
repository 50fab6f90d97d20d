//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/revsent/revsent.toml`
//! 3. Environment variables: `REVSENT_*` prefix
//! 4. Command-line flags (applied by the CLI via [`Settings::with_overrides`])

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Hosted sentiment model used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english";

/// Default cap on classifier response bodies.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Default cap on dataset size, local or remote.
pub const DEFAULT_MAX_DATASET_BYTES: usize = 256 * 1024 * 1024;

const REDACTED: &str = "<redacted>";

/// Unified configuration for revsent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Classifier endpoint URL
    pub endpoint: String,
    /// Default dataset (path or URL)
    pub dataset: Option<String>,
    /// Bearer token for the classifier
    pub token: Option<String>,
    /// Overall request timeout; unset means wait indefinitely
    pub timeout_secs: Option<u64>,
    /// Maximum accepted classifier response body size
    pub max_response_bytes: usize,
    /// Maximum accepted dataset size
    pub max_dataset_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            dataset: None,
            token: None,
            timeout_secs: None,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            max_dataset_bytes: DEFAULT_MAX_DATASET_BYTES,
        }
    }
}

/// Raw settings for intermediate parsing (every field optional).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub endpoint: Option<String>,
    pub dataset: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_response_bytes: Option<usize>,
    pub max_dataset_bytes: Option<usize>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Get the XDG config directory for revsent.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "revsent").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("revsent.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~` and `$VAR` / `${VAR}`; leaves the input untouched on failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Timeout as a `Duration`, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }

    /// Expand shell variables and tilde in the dataset location.
    fn expand_paths(&mut self) {
        if let Some(dataset) = &self.dataset {
            if !crate::infrastructure::http::is_remote(dataset) {
                self.dataset = Some(expand_env_vars(dataset));
            }
        }
    }

    /// Overlay config onto self: overlay wins if Some, otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            endpoint: overlay
                .endpoint
                .clone()
                .unwrap_or_else(|| self.endpoint.clone()),
            dataset: overlay.dataset.clone().or_else(|| self.dataset.clone()),
            token: overlay.token.clone().or_else(|| self.token.clone()),
            timeout_secs: overlay.timeout_secs.or(self.timeout_secs),
            max_response_bytes: overlay
                .max_response_bytes
                .unwrap_or(self.max_response_bytes),
            max_dataset_bytes: overlay.max_dataset_bytes.unwrap_or(self.max_dataset_bytes),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/revsent/revsent.toml`
    /// 3. Environment variables: `REVSENT_*` prefix
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using an explicit config file instead of the XDG location.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_with_env(config_file, None)
    }

    /// Load settings reading `REVSENT_*` from `env` instead of the process
    /// environment when given.
    pub fn load_with_env(
        config_file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_file {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current, env)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply REVSENT_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("REVSENT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("endpoint") {
            settings.endpoint = val;
        }
        if let Ok(val) = config.get_string("dataset") {
            settings.dataset = Some(val);
        }
        if let Ok(val) = config.get_string("token") {
            settings.token = Some(val);
        }
        if let Ok(val) = config.get::<u64>("timeout_secs") {
            settings.timeout_secs = Some(val);
        }
        if let Ok(val) = config.get::<usize>("max_response_bytes") {
            settings.max_response_bytes = val;
        }
        if let Ok(val) = config.get::<usize>("max_dataset_bytes") {
            settings.max_dataset_bytes = val;
        }

        Ok(settings)
    }

    /// Apply command-line overrides (highest precedence).
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(endpoint) = &overrides.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(token) = &overrides.token {
            self.token = Some(token.clone());
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = Some(timeout);
        }
        self
    }

    /// Show the effective configuration as TOML, token redacted.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        let mut shown = self.clone();
        if shown.token.is_some() {
            shown.token = Some(REDACTED.to_string());
        }
        toml::to_string_pretty(&shown).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        format!(
            r#"# revsent configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/revsent/revsent.toml
#   Env:    REVSENT_* environment variables
#   Flags:  --endpoint, --token, --timeout

# Classifier endpoint (POST {{"inputs": "..."}})
# endpoint = "{DEFAULT_ENDPOINT}"

# Dataset used when a command gets no dataset argument (path or URL)
# dataset = "~/data/reviews.tsv"

# Bearer token; raises rate limits, required for private deployments
# token = "hf_..."

# Overall request timeout in seconds (unset: wait indefinitely)
# timeout_secs = 30

# Maximum classifier response body size in bytes
# max_response_bytes = {DEFAULT_MAX_RESPONSE_BYTES}

# Maximum dataset size in bytes (local file or download)
# max_dataset_bytes = {DEFAULT_MAX_DATASET_BYTES}
"#
        )
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
