use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::selector::config::ScoringConfig;
use crate::snapshot::builder::SnapshotOptions;
use crate::source::loader::FetchConfig;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "goal-resolver",
    version,
    about = "Resolve natural-language goals to elements of an HTML document"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: goal-resolver.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve one or more goals against a document
    Resolve {
        /// HTML file, http(s) URL, or - for stdin
        #[arg(short, long)]
        input: String,

        /// Goal to resolve, e.g. "click Submit" (repeatable)
        #[arg(short, long, required = true)]
        goal: Vec<String>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,

        /// Append a JSON line per resolution to this file
        #[arg(long)]
        trace: Option<String>,

        /// Number of runner-up candidates to report
        #[arg(long, default_value_t = 3)]
        top: usize,
    },

    /// Print the indexed elements of a document
    Inspect {
        /// HTML file, http(s) URL, or - for stdin
        #[arg(short, long)]
        input: String,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,

        /// List every element, not only interactive ones (text format)
        #[arg(long, default_value_t = false)]
        all: bool,
    },

    /// Resolve a goal against a serialized snapshot (AnalyzeRequest JSON)
    Analyze {
        /// Request file, or - for stdin
        #[arg(short, long, default_value = "-")]
        request: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `goal-resolver.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub snapshot: SnapshotOptions,
    #[serde(default)]
    pub fetch: FetchConfig,
}

pub const DEFAULT_CONFIG_PATH: &str = "goal-resolver.yaml";

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing,
/// malformed, or carries out-of-range scoring values.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    let content = match std::fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(_) => return AppConfig::default(),
    };

    let config: AppConfig = match serde_yaml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = config_path, error = %e, "ignoring malformed config file");
            return AppConfig::default();
        }
    };

    if let Err(e) = config.scoring.validate() {
        warn!(path = config_path, error = %e, "ignoring config file with invalid scoring");
        return AppConfig::default();
    }

    config
}

// ============================================================================
// Logging
// ============================================================================

/// Map `-v` occurrences to a default filter level.
pub fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_level(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
