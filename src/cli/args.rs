//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Review sentiment sampler: pick a review from a TSV corpus and classify it
#[derive(Parser, Debug)]
#[command(name = "revsent")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Classifier endpoint URL
    #[arg(long, global = true, value_hint = ValueHint::Url)]
    pub endpoint: Option<String>,

    /// Bearer token for the classifier
    #[arg(long, global = true, env = "REVSENT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds (0 disables)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a dataset and report what was kept
    Load {
        /// Dataset path or URL
        #[arg(value_hint = ValueHint::AnyPath)]
        dataset: String,
    },

    /// Print one random review
    Pick {
        /// Dataset path or URL (default: configured dataset)
        #[arg(value_hint = ValueHint::AnyPath)]
        dataset: Option<String>,
    },

    /// Pick a random review and classify it
    Analyze {
        /// Dataset path or URL (default: configured dataset)
        #[arg(value_hint = ValueHint::AnyPath)]
        dataset: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify the given text
    Classify {
        /// Review text
        text: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session: next, again, load, status
    Session {
        /// Dataset path or URL to load first (default: configured dataset)
        #[arg(value_hint = ValueHint::AnyPath)]
        dataset: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective config (token redacted)
    Show,

    /// Create config template
    Init,

    /// Show config path
    Path,
}
